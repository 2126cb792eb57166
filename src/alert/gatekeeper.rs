//! Alert gatekeeper - decides which alerts reach the user.
//!
//! Two independent suppression layers sit in front of every notice:
//! 1. A durable never-show-again set, persisted through the injected
//!    [`KvStore`] and surviving restarts.
//! 2. An in-memory shown-this-session set, fresh per gatekeeper instance.
//!
//! Both sets only grow; the gatekeeper never deletes an entry. Storage reads
//! are fail-open: a failed or absent read counts as "not dismissed".

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::storage::KvStore;

use super::event::AlertEvent;
use super::render::{notice_for, Notice};

/// Why an alert was not presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// The user chose "never show again" in some earlier session.
    Dismissed,
    /// The same `(cause, level)` was already shown this session.
    AlreadyShown,
}

/// Outcome of evaluating one alert event.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Dropped by one of the suppression layers.
    Suppressed(SuppressReason),
    /// Marked as shown, but the `(cause, level)` combination has no notice
    /// body. Nothing is rendered; future duplicates are still suppressed.
    Acknowledged,
    /// Present this notice to the user.
    Present(Notice),
}

/// Gatekeeper for alert presentation.
///
/// Single-threaded by design: callers run on one event loop, so a burst of
/// identical events collapses into a single presentation through the session
/// set without any locking.
pub struct AlertGatekeeper {
    store: Box<dyn KvStore>,
    shown: HashSet<String>,
}

impl AlertGatekeeper {
    /// Create a gatekeeper with a fresh session set on top of `store`.
    pub fn new(store: impl KvStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            shown: HashSet::new(),
        }
    }

    /// Decide whether `event` should be surfaced.
    ///
    /// Checks the durable set first, then the session set. An event that
    /// passes both is marked shown for the rest of the session before the
    /// notice lookup happens, so even bodyless events deduplicate.
    pub fn evaluate(&mut self, event: &AlertEvent) -> Decision {
        let dismiss_key = event.dismiss_key();
        if self.flag(&dismiss_key) {
            debug!(key = %dismiss_key, "alert permanently dismissed, suppressing");
            return Decision::Suppressed(SuppressReason::Dismissed);
        }

        let session_key = event.session_key();
        if self.shown.contains(&session_key) {
            debug!(key = %session_key, "alert already shown this session, suppressing");
            return Decision::Suppressed(SuppressReason::AlreadyShown);
        }
        self.shown.insert(session_key);

        match notice_for(&event.cause, event.level) {
            Some(notice) => Decision::Present(notice),
            None => {
                debug!(
                    cause = %event.cause,
                    level = %event.level,
                    "no notice body for alert, marked shown"
                );
                Decision::Acknowledged
            }
        }
    }

    /// Persist a "never show again" choice for `event`.
    ///
    /// Synchronous and idempotent. A write failure is logged and swallowed;
    /// the worst case is seeing the alert again next session.
    pub fn never_show_again(&self, event: &AlertEvent) {
        let key = event.dismiss_key();
        if let Err(e) = self.store.set_flag(&key, true) {
            warn!(key = %key, error = %e, "failed to persist alert dismissal");
        }
    }

    /// Close the notice without any state change.
    ///
    /// The session set was already marked at presentation time, so the pair
    /// stays quiet for the rest of the session regardless.
    pub fn dismiss(&self, event: &AlertEvent) {
        debug!(key = %event.session_key(), "alert dismissed for this session");
    }

    /// Fail-open durable lookup: errors and absence both read as `false`.
    fn flag(&self, key: &str) -> bool {
        match self.store.get_flag(key) {
            Ok(value) => value.unwrap_or(false),
            Err(e) => {
                debug!(key = %key, error = %e, "dismissal lookup failed, treating as not dismissed");
                false
            }
        }
    }
}
