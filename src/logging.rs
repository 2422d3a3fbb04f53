//! Deterministic scoring journal
//!
//! Entries are collected in memory with timestamps supplied by the caller's
//! clock, so journaling never affects what the engine derives.

use crate::types::{EventId, InningsId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Log level for the scoring journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// A journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    /// Innings the entry concerns, if any
    pub innings_id: Option<InningsId>,
    /// Ball event the entry concerns, if any
    pub event_id: Option<EventId>,
    pub message: String,
    /// Additional structured data
    pub metadata: Vec<(String, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, timestamp: DateTime<Utc>, message: String) -> Self {
        Self {
            level,
            timestamp,
            innings_id: None,
            event_id: None,
            message,
            metadata: Vec::new(),
        }
    }

    pub fn with_innings(mut self, id: InningsId) -> Self {
        self.innings_id = Some(id);
        self
    }

    pub fn with_event(mut self, id: EventId) -> Self {
        self.event_id = Some(id);
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl ToString) -> Self {
        self.metadata.push((key.to_string(), value.to_string()));
        self
    }

    /// Look up a metadata value by key
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Collects journal entries at or above a minimum level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringLogger {
    entries: Vec<LogEntry>,
    min_level: LogLevel,
}

impl ScoringLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            entries: Vec::new(),
            min_level,
        }
    }

    /// Create a logger that captures all levels
    pub fn all() -> Self {
        Self::new(LogLevel::Trace)
    }

    pub fn with_info_level() -> Self {
        Self::new(LogLevel::Info)
    }

    /// Log an entry if it meets the minimum level
    pub fn log(&mut self, entry: LogEntry) {
        if entry.level >= self.min_level {
            self.entries.push(entry);
        }
    }

    pub fn debug(&mut self, timestamp: DateTime<Utc>, message: String) {
        self.log(LogEntry::new(LogLevel::Debug, timestamp, message));
    }

    pub fn info(&mut self, timestamp: DateTime<Utc>, message: String) {
        self.log(LogEntry::new(LogLevel::Info, timestamp, message));
    }

    pub fn warn(&mut self, timestamp: DateTime<Utc>, message: String) {
        self.log(LogEntry::new(LogLevel::Warn, timestamp, message));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn filter_by_level(&self, level: LogLevel) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.level == level).collect()
    }

    pub fn filter_by_innings(&self, innings_id: &InningsId) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.innings_id.as_ref() == Some(innings_id))
            .collect()
    }

    pub fn filter_by_event(&self, event_id: &EventId) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_id.as_ref() == Some(event_id))
            .collect()
    }
}

impl Default for ScoringLogger {
    fn default() -> Self {
        Self::with_info_level()
    }
}
