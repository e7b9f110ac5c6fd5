//! Diagnostic output channel for the harness.
//!
//! Per-case report lines go to stdout; everything routed through [`Log`]
//! goes to stderr so the report stays machine-readable. The capturing
//! implementation lets tests assert on warnings and skip notices without
//! global state.

use std::io::Write;
use std::sync::{Arc, Mutex};

/// Verbosity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Warnings and skip notices (always shown)
    Normal,
    /// Per-candidate selection detail (-v)
    Verbose,
    /// Per-invocation detail (-vv)
    Debug,
}

impl Verbosity {
    /// Map a CLI `-v` flag count to a level.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

/// Sink for harness diagnostics.
pub trait Log {
    /// Emit a message at the given level.
    fn emit(&self, level: Verbosity, message: &str);

    /// Warnings and skip notices; always visible.
    fn warn(&self, message: &str) {
        self.emit(Verbosity::Normal, message);
    }

    /// Selection and ingestion detail; visible with -v.
    fn detail(&self, message: &str) {
        self.emit(Verbosity::Verbose, message);
    }

    /// Invocation-level detail; visible with -vv.
    fn trace(&self, message: &str) {
        self.emit(Verbosity::Debug, message);
    }
}

/// Logger writing to stderr.
#[derive(Debug)]
pub struct StderrLog {
    level: Verbosity,
}

impl StderrLog {
    pub fn new(level: Verbosity) -> Self {
        Self { level }
    }
}

impl Log for StderrLog {
    fn emit(&self, level: Verbosity, message: &str) {
        if level <= self.level {
            let _ = writeln!(std::io::stderr(), "{}", message);
        }
    }
}

/// Capturing logger for tests.
#[derive(Debug, Clone, Default)]
pub struct CaptureLog {
    entries: Arc<Mutex<Vec<(Verbosity, String)>>>,
}

impl CaptureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured messages, in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Messages captured at a specific level.
    pub fn messages_at(&self, level: Verbosity) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Whether any captured message contains the substring.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

impl Log for CaptureLog {
    fn emit(&self, level: Verbosity, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}
