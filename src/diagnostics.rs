//! Diagnostic channel for plugin load failures.

use std::sync::{Arc, RwLock};

/// Prefix of every diagnostic line.
pub const DIAGNOSTIC_PREFIX: &str = "Unable to load plugin: ";

/// Sink for the one-line messages emitted when a plugin fails to load.
pub trait Diagnostics: Send + Sync {
    /// Emit a single line.
    fn report(&self, line: &str);
}

/// Writes each line to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrDiagnostics;

impl Diagnostics for StderrDiagnostics {
    fn report(&self, line: &str) {
        eprintln!("{}", line);
    }
}

/// Forwards each line to `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, line: &str) {
        tracing::error!("{}", line);
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryDiagnostics {
    lines: Arc<RwLock<Vec<String>>>,
}

impl MemoryDiagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines reported so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .read()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Drop all recorded lines.
    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.write() {
            lines.clear();
        }
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn report(&self, line: &str) {
        if let Ok(mut lines) = self.lines.write() {
            lines.push(line.to_string());
        }
    }
}

/// Format the diagnostic line for a failure.
pub fn diagnostic_line(err: &dyn std::fmt::Display) -> String {
    format!("{}{}", DIAGNOSTIC_PREFIX, err)
}
