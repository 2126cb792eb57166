//! Notice bodies for known alert combinations.
//!
//! Pure lookup: `(cause, level)` to the text and action set shown to the user.
//! Combinations without an entry are still tracked by the gatekeeper but render
//! nothing.

use serde::{Deserialize, Serialize};

use super::event::AlertLevel;

/// Title shared by every notice.
pub const NOTICE_TITLE: &str = "Printwatch";

/// Presentation severity. Warnings render as notices, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Notice,
}

impl From<AlertLevel> for Severity {
    fn from(level: AlertLevel) -> Self {
        match level {
            AlertLevel::Error => Severity::Error,
            AlertLevel::Warning => Severity::Notice,
        }
    }
}

/// Buttons offered on a notice. The presentation layer maps the chosen action
/// back to the matching gatekeeper operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    ShowDetails,
    NeverShowAgain,
    Dismiss,
}

impl AlertAction {
    pub fn label(&self) -> &'static str {
        match self {
            AlertAction::ShowDetails => "Details",
            AlertAction::NeverShowAgain => "Never show again",
            AlertAction::Dismiss => "OK",
        }
    }
}

/// A renderable, dismissible notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub severity: Severity,
    pub actions: Vec<AlertAction>,
}

/// Look up the notice for a `(cause, level)` pair.
///
/// Returns `None` for combinations with no message body. Error-level notices
/// carry a leading `Details` action that opens the diagnostic view.
pub fn notice_for(cause: &str, level: AlertLevel) -> Option<Notice> {
    let body = match (cause, level) {
        ("server", AlertLevel::Error) => {
            "Printwatch failed to connect to the server. \
             Please make sure the printer host has a reliable internet connection."
        }
        ("webcam", AlertLevel::Error) => {
            "Printwatch failed to connect to the webcam. \
             Please check that the stream URL and snapshot URL are set correctly \
             in the webcam settings."
        }
        ("streaming", AlertLevel::Warning) => {
            "Premium webcam streaming failed to start. \
             Printwatch has switched to basic streaming."
        }
        ("cpu", AlertLevel::Warning) => {
            "Premium streaming uses excessive CPU. This may negatively impact your \
             print quality. Consider switching compatibility mode to \"auto\" or \
             \"never\", or disabling premium streaming."
        }
        _ => return None,
    };

    let mut actions = vec![AlertAction::NeverShowAgain, AlertAction::Dismiss];
    if level == AlertLevel::Error {
        actions.insert(0, AlertAction::ShowDetails);
    }

    Some(Notice {
        title: NOTICE_TITLE.to_string(),
        body: body.to_string(),
        severity: level.into(),
        actions,
    })
}
