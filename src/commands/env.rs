//! `envsync env` - sync, plan, and list application variables

use anyhow::{Context as AnyhowContext, Result};
use colored::Colorize;
use envkit::{
    CommonFlags, OperationRequest, RemoteDeclaration, RemoteService, SyncError, SyncPlan,
    SyncResult,
};
use std::path::Path;

use crate::Context;
use crate::cli::{EnvCommand, PlanArgs, SyncArgs};
use crate::client::HttpRemote;
use crate::config::Config;
use crate::progress::SyncProgress;
use crate::ui;

const VALUE_PREVIEW_LEN: usize = 40;

pub fn run(ctx: &Context, cmd: EnvCommand) -> Result<()> {
    match cmd {
        EnvCommand::Sync(args) => sync(ctx, args),
        EnvCommand::Plan(args) => plan(ctx, args),
        EnvCommand::List {
            resource,
            json,
            show_values,
        } => list(ctx, &resource, json, show_values),
    }
}

fn connect() -> Result<HttpRemote> {
    let config = Config::load()?;
    let connection = config.connection()?;
    log::debug!("Connecting to {}", connection.base_url);
    Ok(HttpRemote::new(&connection))
}

/// Show where a remote failure came from and what to do about it
fn explain(err: SyncError) -> anyhow::Error {
    if let SyncError::Remote(remote) = &err {
        ui::dim(remote.category().advice());
    }
    err.into()
}

fn prepare_plan<R: RemoteService>(
    remote: &R,
    resource: &str,
    file: &Path,
    flags: &CommonFlags,
) -> Result<SyncPlan> {
    envkit::prepare(file, resource, flags, remote)
        .map_err(explain)
        .with_context(|| format!("Could not plan sync of {} to {}", file.display(), resource))
}

// ============================================================================
// Plan / Sync
// ============================================================================

fn plan(ctx: &Context, args: PlanArgs) -> Result<()> {
    let remote = connect()?;
    let flags: CommonFlags = args.flags.into();
    let plan = prepare_plan(&remote, &args.resource, &args.file, &flags)?;

    display_plan(ctx, &plan, &args.resource);
    Ok(())
}

fn sync(ctx: &Context, args: SyncArgs) -> Result<()> {
    let remote = connect()?;
    let resource = args.plan.resource.as_str();
    let flags: CommonFlags = args.plan.flags.into();
    let plan = prepare_plan(&remote, resource, &args.plan.file, &flags)?;

    display_plan(ctx, &plan, resource);

    if plan.is_empty() {
        return Ok(());
    }

    if args.dry_run {
        println!();
        ui::info("Dry run - no changes made");
        return Ok(());
    }

    if !args.yes && !confirm_proceed()? {
        println!();
        println!("  {} Aborted", "✗".red());
        return Ok(());
    }

    println!();
    let mut progress = SyncProgress::new(ctx.quiet);
    let result = envkit::execute(&plan, resource, &remote, &mut progress);

    display_summary(&result);

    envkit::sync::finish(result)
        .map(|_| ())
        .with_context(|| format!("Sync to {resource} did not complete cleanly"))
}

fn display_plan(ctx: &Context, plan: &SyncPlan, resource: &str) {
    if plan.is_empty() {
        ui::info("No variables declared in file; nothing to sync");
        return;
    }

    ui::header(&format!("Sync plan for {resource}"));

    if !plan.to_update.is_empty() {
        ui::section(&format!("Update ({})", plan.to_update.len()));
        for request in &plan.to_update {
            print_request("~".yellow().to_string(), request, ctx.verbose > 0);
        }
    }

    if !plan.to_create.is_empty() {
        ui::section(&format!("Create ({})", plan.to_create.len()));
        for request in &plan.to_create {
            print_request("+".green().to_string(), request, ctx.verbose > 0);
        }
    }
}

fn print_request(marker: String, request: &OperationRequest, show_value: bool) {
    let value = if show_value {
        ui::one_line(&request.value, VALUE_PREVIEW_LEN)
    } else {
        ui::mask(&request.value)
    };
    let flags = ui::flag_list(
        request.is_build_time.unwrap_or(false),
        request.is_literal.unwrap_or(false),
        request.is_multiline.unwrap_or(false),
        request.is_runtime.unwrap_or(false),
    );
    println!("  {} {} = {} {}", marker, request.key, value, flags.dimmed());
}

fn display_summary(result: &SyncResult) {
    ui::header("Summary");
    ui::kv("Updated", &result.updated.to_string());
    ui::kv("Created", &result.created.to_string());
    ui::kv("Failed", &result.failed.to_string());

    if !result.failures.is_empty() {
        ui::section("Failures");
        for failure in &result.failures {
            println!("  {} {}: {}", "✗".red(), failure.key, failure.error);
        }
    }

    if result.failed > result.failures.len() {
        ui::warn(&format!(
            "{} updates were sent in one bulk call and are reported as failed together; \
             some may have been applied",
            result.failed - result.failures.len()
        ));
    }

    println!();
    if result.is_success() {
        ui::success(&format!("Synced {} variables", result.total_changes()));
    } else {
        ui::error(&format!(
            "{} of {} operations failed",
            result.failed,
            result.attempted()
        ));
    }
}

/// Confirm with user
fn confirm_proceed() -> Result<bool> {
    use dialoguer::Confirm;

    println!();
    let confirmed = Confirm::new()
        .with_prompt("Apply these changes?")
        .default(true)
        .interact()?;

    Ok(confirmed)
}

// ============================================================================
// List
// ============================================================================

fn list(ctx: &Context, resource: &str, json: bool, show_values: bool) -> Result<()> {
    let remote = connect()?;
    let mut vars = remote
        .list(resource)
        .map_err(|e| explain(e.into()))
        .with_context(|| format!("Could not list variables of {resource}"))?;

    if !show_values {
        for var in &mut vars {
            var.value = ui::mask(&var.value);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&vars)?);
        return Ok(());
    }

    if vars.is_empty() {
        ui::info(&format!("No variables set on {resource}"));
        return Ok(());
    }

    ui::header(&format!("Variables of {resource} ({})", vars.len()));
    for var in &vars {
        print_remote(var, ctx.verbose > 0);
    }
    Ok(())
}

fn print_remote(var: &RemoteDeclaration, show_identity: bool) {
    let flags = ui::flag_list(
        var.is_build_time,
        var.is_literal,
        var.is_multiline,
        var.is_runtime,
    );
    println!(
        "  {} = {} {}",
        var.key.bold(),
        ui::one_line(&var.value, VALUE_PREVIEW_LEN),
        flags.dimmed()
    );
    if show_identity {
        ui::dim(&var.identity);
    }
}
