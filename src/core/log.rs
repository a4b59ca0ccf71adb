//! Bounded per-engine log.
//!
//! Entries are kept in memory for inspection through `Engine::logs` and are
//! mirrored into `tracing` so an application subscriber sees the same events.

use super::buffer::BoundedBuffer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of entries retained by an [`EngineLog`].
pub const LOG_CAPACITY: usize = 1000;

/// Severity of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

/// In-memory log holding the [`LOG_CAPACITY`] most recent entries.
#[derive(Debug)]
pub struct EngineLog {
    /// Rendered engine key, attached to every `tracing` event.
    key: String,
    entries: BoundedBuffer<LogEntry>,
}

impl EngineLog {
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_capacity(key, LOG_CAPACITY)
    }

    pub fn with_capacity(key: impl Into<String>, capacity: usize) -> Self {
        Self {
            key: key.into(),
            entries: BoundedBuffer::new(capacity),
        }
    }

    pub fn write(&self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Info => tracing::info!(key = %self.key, "{}", message),
            LogLevel::Warning => tracing::warn!(key = %self.key, "{}", message),
            LogLevel::Error => tracing::error!(key = %self.key, "{}", message),
        }
        self.entries.push(LogEntry {
            timestamp: Utc::now(),
            level,
            message,
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.write(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.write(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.write(LogLevel::Error, message);
    }

    /// Snapshot of the retained entries, optionally restricted to one level.
    pub fn entries(&self, level: Option<LogLevel>) -> Vec<LogEntry> {
        match level {
            Some(level) => self.entries.filtered(|entry| entry.level == level),
            None => self.entries.snapshot(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
