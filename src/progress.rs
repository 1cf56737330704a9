//! Terminal progress for sync execution.

use colored::Colorize;
use envkit::{Phase, ProgressCallback, RemoteDeclaration, RemoteError, SyncResult};
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner for the bulk update, bar for the create loop
pub struct SyncProgress {
    bar: Option<ProgressBar>,
    quiet: bool,
}

impl SyncProgress {
    pub fn new(quiet: bool) -> Self {
        Self { bar: None, quiet }
    }

    fn spinner(msg: String) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg);
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    fn bar(len: usize) -> ProgressBar {
        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb
    }
}

impl ProgressCallback for SyncProgress {
    fn on_phase_start(&mut self, phase: Phase, count: usize) {
        if self.quiet {
            return;
        }
        self.bar = Some(match phase {
            Phase::BulkUpdate => Self::spinner(format!("Updating {count} variables...")),
            Phase::Create => Self::bar(count),
        });
    }

    fn on_create_complete(&mut self, key: &str, result: Result<&RemoteDeclaration, &RemoteError>) {
        let Some(pb) = &self.bar else {
            return;
        };
        pb.set_message(key.to_string());
        if let Err(e) = result {
            pb.suspend(|| {
                println!("  {} {} ({})", "✗".red(), key, e.message);
            });
        }
        pb.inc(1);
    }

    fn on_phase_complete(&mut self, phase: Phase, result: &SyncResult) {
        let Some(pb) = self.bar.take() else {
            return;
        };
        pb.finish_and_clear();

        match phase {
            Phase::BulkUpdate if result.updated > 0 => {
                println!("  {} Updated {} variables", "✓".green(), result.updated);
            }
            Phase::BulkUpdate => {
                println!("  {} Bulk update failed", "✗".red());
            }
            Phase::Create => {
                println!("  {} Created {} variables", "✓".green(), result.created);
            }
        }
    }
}
