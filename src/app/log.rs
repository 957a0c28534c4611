//! Operation log - user-visible outcome of every action, newest first

use chrono::{DateTime, Local};
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogKind {
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub kind: LogKind,
    pub execution_time_ms: Option<u64>,
}

impl LogEntry {
    pub fn new(kind: LogKind, message: impl Into<String>, execution_time_ms: Option<u64>) -> Self {
        LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            kind,
            execution_time_ms,
        }
    }

    /// `[14:03:11] Accounts loaded. (12 ms)`; a zero timing is not shown
    pub fn display_line(&self) -> String {
        let timing = match self.execution_time_ms {
            Some(ms) if ms > 0 => format!(" ({} ms)", ms),
            _ => String::new(),
        };
        format!("[{}] {}{}", self.timestamp.format("%H:%M:%S"), self.message, timing)
    }
}

/// Append-only, in-memory log
#[derive(Clone, Debug, Default)]
pub struct OperationLog {
    entries: VecDeque<LogEntry>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        match entry.kind {
            LogKind::Success => tracing::info!(text = %entry.message, time_ms = ?entry.execution_time_ms, "operation succeeded"),
            LogKind::Error => tracing::warn!(text = %entry.message, time_ms = ?entry.execution_time_ms, "operation failed"),
        }
        self.entries.push_front(entry);
    }

    pub fn success(&mut self, message: impl Into<String>, execution_time_ms: Option<u64>) {
        self.push(LogEntry::new(LogKind::Success, message, execution_time_ms));
    }

    pub fn error(&mut self, message: impl Into<String>, execution_time_ms: Option<u64>) {
        self.push(LogEntry::new(LogKind::Error, message, execution_time_ms));
    }

    /// Entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
