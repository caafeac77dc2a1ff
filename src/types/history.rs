//! Append-only event log

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::LogEntry;

/// Ordered, append-only sequence of entries plus the time the first one arrived.
///
/// This is a plain value: the broadcaster owns the live copy and hands out
/// clones as history snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventLog {
    started_at: Option<DateTime<Utc>>,
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a non-terminal entry.
    ///
    /// The first appended entry sets `started_at`. Terminal entries are not
    /// part of the history and are ignored; returns whether the entry was stored.
    pub fn append(&mut self, entry: LogEntry) -> bool {
        if entry.is_terminal() {
            return false;
        }
        if self.entries.is_empty() {
            self.started_at = Some(entry.timestamp());
        }
        self.entries.push(entry);
        true
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_first_entry_sets_started_at() {
        let mut log = EventLog::new();
        assert!(log.started_at().is_none());

        let first = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 5).unwrap();
        log.append(LogEntry::at(first, "Provisioning"));
        log.append(LogEntry::at(second, "Starting..."));

        assert_eq!(log.started_at(), Some(first));
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[1].text(), "Starting...");
    }

    #[test]
    fn test_terminal_entry_is_not_stored() {
        let mut log = EventLog::new();
        assert!(!log.append(LogEntry::terminal()));
        assert!(log.is_empty());
        assert!(log.started_at().is_none());
    }
}
