//! Alert pipeline - events, suppression, and notice rendering.
//!
//! The backend reports alerts as `(cause, level)` pairs. This module decides
//! which of them the user actually sees:
//! 1. [`event`] defines the wire shape and the suppression keys.
//! 2. [`gatekeeper`] applies the two suppression layers (durable dismissals
//!    and the per-session shown set).
//! 3. [`render`] maps known pairs to notice text and actions.

pub mod event;
pub mod gatekeeper;
pub mod render;

pub use event::{AlertEvent, AlertLevel};
pub use gatekeeper::{AlertGatekeeper, Decision, SuppressReason};
pub use render::{notice_for, AlertAction, Notice, Severity, NOTICE_TITLE};
