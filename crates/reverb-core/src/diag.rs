//! Diagnostics side-channel for non-fatal signals
//!
//! The core never writes to an output stream directly. Deprecation
//! warnings and similar informational signals go through the injected
//! [`Diagnostics`] collaborator, so hosts decide where they end up and
//! tests can assert on them without capturing stdout.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Collaborator that receives non-fatal diagnostics from the core
pub trait Diagnostics {
    /// Record a diagnostic message
    fn log(&self, level: LogLevel, message: &str);

    /// Record a warning
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }
}

/// Diagnostics sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// Diagnostics sink that keeps messages in memory
///
/// Cloning produces another handle to the same buffer. Useful for tests
/// and for hosts that batch-drain diagnostics.
#[derive(Debug, Clone, Default)]
pub struct MemoryDiagnostics {
    messages: Rc<RefCell<Vec<(LogLevel, String)>>>,
}

impl MemoryDiagnostics {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages, in order
    pub fn messages(&self) -> Vec<(LogLevel, String)> {
        self.messages.borrow().clone()
    }

    /// Recorded warning messages, in order
    pub fn warnings(&self) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(level, _)| *level == LogLevel::Warn)
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Number of recorded messages
    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    /// Drop all recorded messages
    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn log(&self, level: LogLevel, message: &str) {
        self.messages
            .borrow_mut()
            .push((level, message.to_string()));
    }
}
