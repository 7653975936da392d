//! User-facing notices
//!
//! The transport reports failures to the user through a [`Notifier`]. The CLI
//! uses [`ConsoleNotifier`]; embedders can plug in their own sink, and
//! [`MemoryNotifier`] keeps notices around for inspection.

use crate::config::NOTICE_DURATION_SECS;
use console::{style, Term};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// A transient error message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Text shown to the user
    pub message: String,
    /// How long the notice should stay visible
    pub duration: Duration,
}

impl Notice {
    /// Error notice with the standard display duration
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: Duration::from_secs(NOTICE_DURATION_SECS),
        }
    }
}

/// Sink for user-facing notices
pub trait Notifier: Send + Sync {
    /// Show a notice to the user
    fn notify(&self, notice: &Notice);
}

/// Writes notices to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        let marker = style("✗").red().bold();
        // A closed stderr is not worth failing a request over.
        let _ = Term::stderr().write_line(&format!("{marker} {}", notice.message));
    }
}

/// Discards every notice
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notice: &Notice) {}
}

/// Records notices in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(&Notice::error("first"));
        notifier.notify(&Notice::error("second"));

        let notices = notifier.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].message, "first");
        assert_eq!(notices[1].duration, Duration::from_secs(5));
    }
}
