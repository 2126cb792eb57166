//! Printwatch - surface alerts from a 3D printer monitoring plugin.
//!
//! The library polls the plugin's status endpoint, mirrors server-reported
//! state, and gates alert notifications behind two suppression layers: a
//! durable "never show again" set and a per-session shown set.

pub mod alert;
pub mod client;
pub mod monitor;
pub mod presenter;
pub mod status;
pub mod storage;

pub use alert::{
    notice_for, AlertAction, AlertEvent, AlertGatekeeper, AlertLevel, Decision, Notice, Severity,
    SuppressReason,
};
pub use client::{CommandSink, HttpConfig, HttpPluginApi, PluginCommand, StatusSource};
pub use monitor::PluginMonitor;
pub use presenter::{ConsolePresenter, NotificationPresenter, OPT_IN_PROMPT};
pub use status::{ErrorStats, ErrorTally, PluginStatus, PushMessage, ServerStatus, StreamingStatus};
pub use storage::{FileStore, KvStore, MemoryStore};
