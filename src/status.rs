//! Plugin status payload and push messages.
//!
//! Mirrors the `get_plugin_status` response shape. Every field defaults so
//! partial or older payloads still deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::alert::AlertEvent;

/// Full status payload returned by the plugin backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginStatus {
    #[serde(default)]
    pub server_status: ServerStatus,
    /// Opaque printer record; only presence matters to this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_printer: Option<Value>,
    #[serde(default)]
    pub streaming_status: StreamingStatus,
    #[serde(default)]
    pub error_stats: ErrorStats,
    #[serde(default)]
    pub alerts: Vec<AlertEvent>,
    /// `"out"` means the user has not yet been asked to enable anonymized
    /// diagnostic reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentry_opt: Option<String>,
}

impl PluginStatus {
    /// Whether this payload should trigger the one-time diagnostics opt-in
    /// prompt. The backend flips the flag after reporting `"out"` once, so
    /// re-prompting is prevented host-side.
    pub fn wants_diagnostics_opt_in(&self) -> bool {
        self.sentry_opt.as_deref() == Some("out")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerStatus {
    #[serde(default)]
    pub is_connected: bool,
    /// Unix timestamp of the last status update, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status_update_ts: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamingStatus {
    #[serde(default)]
    pub is_pi_camera: bool,
    #[serde(default)]
    pub premium_streaming: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorStats {
    #[serde(default)]
    pub server: ErrorTally,
    #[serde(default)]
    pub webcam: ErrorTally,
}

/// Rolling connection error counters for one subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorTally {
    #[serde(default)]
    pub attempts: u64,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<DateTime<Utc>>,
}

/// Inbound push message from the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushMessage {
    pub plugin_id: String,
    #[serde(default)]
    pub payload: Value,
}

impl PushMessage {
    pub fn new(plugin_id: impl Into<String>, payload: Value) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            payload,
        }
    }

    /// True when `payload.new_alert` is truthy. The host sends loosely typed
    /// payloads, so any non-empty, non-zero value counts.
    pub fn announces_new_alert(&self) -> bool {
        match self.payload.get("new_alert") {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
            Some(Value::Null) | None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertLevel;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_payload() {
        let status: PluginStatus = serde_json::from_value(json!({
            "server_status": {"is_connected": true, "last_status_update_ts": 1724700000.5},
            "linked_printer": {"name": "Voron"},
            "streaming_status": {"is_pi_camera": true, "premium_streaming": true},
            "error_stats": {
                "server": {"attempts": 10, "error_count": 2,
                           "first": "2026-08-01T00:00:00Z", "last": "2026-08-02T00:00:00Z"},
                "webcam": {"attempts": 5, "error_count": 0}
            },
            "alerts": [{"cause": "server", "level": "error"}],
            "sentry_opt": "out"
        }))
        .unwrap();

        assert!(status.server_status.is_connected);
        assert!(status.streaming_status.premium_streaming);
        assert_eq!(status.error_stats.server.error_count, 2);
        assert!(status.error_stats.server.first.is_some());
        assert_eq!(status.alerts.len(), 1);
        assert_eq!(status.alerts[0].level, AlertLevel::Error);
        assert!(status.wants_diagnostics_opt_in());
    }

    #[test]
    fn test_deserialize_partial_payload() {
        let status: PluginStatus = serde_json::from_value(json!({
            "streaming_status": {"is_pi_camera": false}
        }))
        .unwrap();

        assert!(!status.server_status.is_connected);
        assert!(status.alerts.is_empty());
        assert!(status.sentry_opt.is_none());
        assert!(!status.wants_diagnostics_opt_in());
    }

    #[test]
    fn test_opt_in_only_for_literal_out() {
        for (value, expected) in [("out", true), ("in", false), ("asked", false)] {
            let status = PluginStatus {
                sentry_opt: Some(value.to_string()),
                ..Default::default()
            };
            assert_eq!(status.wants_diagnostics_opt_in(), expected, "sentry_opt={value}");
        }
    }

    #[test]
    fn test_push_message_truthiness() {
        let truthy = [
            json!({"new_alert": true}),
            json!({"new_alert": 1}),
            json!({"new_alert": "yes"}),
            json!({"new_alert": {"cause": "server"}}),
        ];
        for payload in truthy {
            assert!(PushMessage::new("printwatch", payload.clone()).announces_new_alert(), "{payload}");
        }

        let falsy = [
            json!({"new_alert": false}),
            json!({"new_alert": 0}),
            json!({"new_alert": ""}),
            json!({"new_alert": null}),
            json!({"other_field": true}),
            json!({}),
        ];
        for payload in falsy {
            assert!(!PushMessage::new("printwatch", payload.clone()).announces_new_alert(), "{payload}");
        }
    }

    #[test]
    fn test_push_message_deserialize() {
        let message: PushMessage =
            serde_json::from_str(r#"{"plugin_id": "printwatch", "payload": {"new_alert": true}}"#)
                .unwrap();
        assert_eq!(message.plugin_id, "printwatch");
        assert!(message.announces_new_alert());
    }
}
