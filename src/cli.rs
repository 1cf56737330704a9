use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "envsync")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Sync .env files to your deployment server", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage environment variables of an application
    #[command(subcommand)]
    Env(EnvCommand),

    /// Show config file location and resolved settings
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Env Commands
// ============================================================================

#[derive(Subcommand)]
pub enum EnvCommand {
    /// Push a .env file: update existing keys, create missing ones
    Sync(SyncArgs),

    /// Show what sync would change without writing anything
    Plan(PlanArgs),

    /// List variables currently set on the remote
    List {
        /// Application identifier
        resource: String,

        /// Print raw JSON
        #[arg(long)]
        json: bool,

        /// Show values (hidden by default)
        #[arg(long)]
        show_values: bool,
    },
}

#[derive(Args)]
pub struct PlanArgs {
    /// Application identifier
    pub resource: String,

    /// Path to the .env file
    pub file: PathBuf,

    #[command(flatten)]
    pub flags: FlagArgs,
}

#[derive(Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Show the plan and stop
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Flags applied to every synced variable. Omitted flags keep the remote default.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct FlagArgs {
    /// Make variables available at build time
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub build_time: Option<bool>,

    /// Disable variable interpolation for the values
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub is_literal: Option<bool>,

    /// Make variables available at runtime
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub runtime: Option<bool>,
}

impl From<FlagArgs> for envkit::CommonFlags {
    fn from(args: FlagArgs) -> Self {
        Self {
            build_time: args.build_time,
            is_literal: args.is_literal,
            runtime: args.runtime,
        }
    }
}
