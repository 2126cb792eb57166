//! Notification presentation seam.
//!
//! The gatekeeper decides *what* to show; a presenter decides *how*. The
//! console implementation is what the CLI uses; tests substitute a recording
//! double.

use anyhow::Result;
use dialoguer::{Confirm, Select};
use tracing::debug;

use crate::alert::{AlertAction, Notice, Severity};
use crate::status::ErrorStats;

/// Prompt text for the one-time diagnostics opt-in.
pub const OPT_IN_PROMPT: &str =
    "Turn on bug reporting to help improve Printwatch? The debugging info \
     included in the report will be anonymized.";

/// Displays dismissible notices and prompts.
pub trait NotificationPresenter {
    /// Show `notice` and report which of its actions the user chose.
    fn present(&self, notice: &Notice) -> Result<AlertAction>;

    /// Open the diagnostic view with the current connection error counters.
    fn show_details(&self, stats: &ErrorStats) -> Result<()>;

    /// Ask a yes/no question; `Ok(true)` means confirmed.
    fn confirm_opt_in(&self, prompt: &str) -> Result<bool>;
}

/// Terminal presenter built on dialoguer prompts.
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl ConsolePresenter {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationPresenter for ConsolePresenter {
    fn present(&self, notice: &Notice) -> Result<AlertAction> {
        let tag = match notice.severity {
            Severity::Error => "ERROR",
            Severity::Notice => "NOTICE",
        };
        eprintln!("\n[{}] {}", tag, notice.title);
        eprintln!("{}\n", notice.body);

        let labels: Vec<&str> = notice.actions.iter().map(AlertAction::label).collect();
        // default to the last action, which is always the plain dismissal
        let chosen = Select::new()
            .with_prompt("Action")
            .items(&labels)
            .default(labels.len() - 1)
            .interact()?;

        debug!(action = labels[chosen], "notice action chosen");
        Ok(notice.actions[chosen])
    }

    fn show_details(&self, stats: &ErrorStats) -> Result<()> {
        eprintln!("\nDiagnostic report");
        eprintln!(
            "  server: {} errors in {} attempts",
            stats.server.error_count, stats.server.attempts
        );
        eprintln!(
            "  webcam: {} errors in {} attempts",
            stats.webcam.error_count, stats.webcam.attempts
        );
        if let Some(last) = &stats.server.last {
            eprintln!("  last server error: {}", last);
        }
        if let Some(last) = &stats.webcam.last {
            eprintln!("  last webcam error: {}", last);
        }
        Ok(())
    }

    fn confirm_opt_in(&self, prompt: &str) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}
