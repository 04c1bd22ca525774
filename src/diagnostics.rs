//! Operator-facing warnings
//!
//! Non-fatal problems (a guessed document root, a stylesheet that could not be
//! rebased) are reported through a [`Diagnostics`] sink instead of being written to
//! a process-wide stream. The default sink forwards to `log`; tests install a
//! [`CollectingDiagnostics`] and assert on what was reported.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Sink for non-fatal warnings
pub trait Diagnostics: Send + Sync {
    fn warn(&self, message: &str);
}

/// Shared handle to a diagnostics sink
pub type DiagnosticsHandle = Arc<dyn Diagnostics>;

/// Forwards every warning to `log::warn!`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&self, message: &str) {
        log::warn!(target: "critical::diagnostics", "{message}");
    }
}

/// Keeps every warning in memory
#[derive(Default)]
pub struct CollectingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl CollectingDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings reported so far
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// True if any reported warning contains `needle`
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.lock().iter().any(|m| m.contains(needle))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn warn(&self, message: &str) {
        log::debug!(target: "critical::diagnostics", "collected warning: {message}");
        self.messages.lock().push(message.to_string());
    }
}

impl fmt::Debug for CollectingDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectingDiagnostics")
            .field("messages", &self.messages.lock().len())
            .finish()
    }
}
