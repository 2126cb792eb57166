//! Plugin monitor - ties the status source, gatekeeper and presenter together.
//!
//! This is the reframed settings view-model: it mirrors server-reported state
//! into plain fields, routes alerts through the gatekeeper, and handles the
//! one-time diagnostics opt-in prompt.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::alert::{AlertAction, AlertGatekeeper, Decision};
use crate::client::{CommandSink, PluginCommand, StatusSource};
use crate::presenter::{NotificationPresenter, OPT_IN_PROMPT};
use crate::status::{ErrorStats, PluginStatus, PushMessage, StreamingStatus};

pub struct PluginMonitor {
    plugin_id: String,
    gatekeeper: AlertGatekeeper,
    source: Box<dyn StatusSource>,
    sink: Box<dyn CommandSink>,
    presenter: Box<dyn NotificationPresenter>,
    streaming: StreamingStatus,
    error_stats: ErrorStats,
}

impl PluginMonitor {
    pub fn new(
        plugin_id: impl Into<String>,
        gatekeeper: AlertGatekeeper,
        source: impl StatusSource + 'static,
        sink: impl CommandSink + 'static,
        presenter: impl NotificationPresenter + 'static,
    ) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            gatekeeper,
            source: Box::new(source),
            sink: Box::new(sink),
            presenter: Box::new(presenter),
            streaming: StreamingStatus::default(),
            error_stats: ErrorStats::default(),
        }
    }

    /// Last mirrored streaming state.
    pub fn streaming(&self) -> &StreamingStatus {
        &self.streaming
    }

    /// Last mirrored connection error counters.
    pub fn error_stats(&self) -> &ErrorStats {
        &self.error_stats
    }

    /// Fetch the plugin status and process it.
    ///
    /// A failed fetch is logged and dropped: no retry, no user-visible error.
    pub fn refresh(&mut self) -> Result<()> {
        let status = match self.source.fetch_status() {
            Ok(status) => status,
            Err(e) => {
                debug!(error = %e, "status fetch failed, skipping cycle");
                return Ok(());
            }
        };
        self.apply(status)
    }

    /// React to an inbound push message: refresh only when it is addressed to
    /// this plugin and announces a new alert.
    pub fn handle_push(&mut self, message: &PushMessage) -> Result<()> {
        if message.plugin_id != self.plugin_id {
            return Ok(());
        }
        if !message.announces_new_alert() {
            return Ok(());
        }
        info!("new alert announced, refreshing plugin status");
        self.refresh()
    }

    fn apply(&mut self, status: PluginStatus) -> Result<()> {
        if status.wants_diagnostics_opt_in() {
            self.prompt_opt_in();
        }

        for alert in &status.alerts {
            match self.gatekeeper.evaluate(alert) {
                Decision::Present(notice) => {
                    let action = match self.presenter.present(&notice) {
                        Ok(action) => action,
                        Err(e) => {
                            warn!(cause = %alert.cause, error = %e, "failed to present notice");
                            continue;
                        }
                    };
                    match action {
                        AlertAction::NeverShowAgain => self.gatekeeper.never_show_again(alert),
                        AlertAction::Dismiss => self.gatekeeper.dismiss(alert),
                        AlertAction::ShowDetails => {
                            if let Err(e) = self.presenter.show_details(&status.error_stats) {
                                warn!(error = %e, "failed to open diagnostic view");
                            }
                        }
                    }
                }
                Decision::Acknowledged => {
                    debug!(cause = %alert.cause, level = %alert.level, "alert acknowledged without notice")
                }
                Decision::Suppressed(reason) => {
                    debug!(cause = %alert.cause, level = %alert.level, ?reason, "alert suppressed")
                }
            }
        }

        self.streaming = status.streaming_status;
        self.error_stats = status.error_stats;
        Ok(())
    }

    fn prompt_opt_in(&self) {
        match self.presenter.confirm_opt_in(OPT_IN_PROMPT) {
            Ok(true) => {
                info!("diagnostics opt-in confirmed");
                if let Err(e) = self.sink.send_command(PluginCommand::ToggleSentryOpt) {
                    warn!(error = %e, "failed to send opt-in toggle");
                }
            }
            Ok(false) => debug!("diagnostics opt-in declined"),
            Err(e) => warn!(error = %e, "opt-in prompt failed"),
        }
    }
}
