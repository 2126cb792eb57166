//! Alert events reported by the plugin backend.
//!
//! An alert identifies a condition by its `cause` (which subsystem went wrong)
//! and `level` (how bad it is). The two suppression keys derived here are the
//! only identity the rest of the alert pipeline cares about.

use serde::{Deserialize, Serialize};

/// Severity of an alert as reported on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Error,
    Warning,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Error => "error",
            AlertLevel::Warning => "warning",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One alert occurrence delivered by the status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Originating subsystem, e.g. `server`, `webcam`, `streaming`, `cpu`.
    pub cause: String,
    pub level: AlertLevel,
    /// Optional free-form detail from the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AlertEvent {
    pub fn new(cause: impl Into<String>, level: AlertLevel) -> Self {
        Self {
            cause: cause.into(),
            level,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Key for the in-memory shown-this-session set.
    pub fn session_key(&self) -> String {
        format!("{}.{}", self.cause, self.level)
    }

    /// Key for the durable never-show-again set.
    pub fn dismiss_key(&self) -> String {
        format!("ignored.{}.{}", self.cause, self.level)
    }
}
