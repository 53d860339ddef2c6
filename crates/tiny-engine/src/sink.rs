//! Where `msg` and `print` output goes.

use crate::util::str_val;
use serde_json::Value;
use std::sync::Mutex;

pub trait Sink: Send + Sync {
    /// A literal message from `msg`.
    fn message(&self, msg: &Value);

    /// A `name -> value` line from `print`. `value` is `None` when undefined.
    fn variable(&self, name: &str, value: Option<&Value>);
}

pub fn format_variable(name: &str, value: Option<&Value>) -> String {
    match value {
        Some(v) => format!("{name} -> {v}"),
        None => format!("{name} -> undefined"),
    }
}

/// Emits output as `info` events. Used when the host supplies no sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn message(&self, msg: &Value) {
        tracing::info!(target: "tiny_engine::msg", "{}", str_val(msg));
    }

    fn variable(&self, name: &str, value: Option<&Value>) {
        tracing::info!(target: "tiny_engine::print", "{}", format_variable(name, value));
    }
}

/// Collects output lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl Sink for MemorySink {
    fn message(&self, msg: &Value) {
        self.push(str_val(msg));
    }

    fn variable(&self, name: &str, value: Option<&Value>) {
        self.push(format_variable(name, value));
    }
}
