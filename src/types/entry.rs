//! Log entry type

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One timestamped unit of producer output.
///
/// Entries are immutable once created. A terminal entry has no text and
/// marks the end of the stream; it is never stored in an [`EventLog`](super::EventLog).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    timestamp: DateTime<Utc>,
    text: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    is_terminal: bool,
}

impl LogEntry {
    /// Create an entry stamped with the current time
    pub fn new(text: impl Into<String>) -> Self {
        Self::at(Utc::now(), text)
    }

    /// Create an entry with an explicit timestamp
    pub fn at(timestamp: DateTime<Utc>, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
            is_terminal: false,
        }
    }

    /// Create the end-of-stream marker
    pub fn terminal() -> Self {
        Self {
            timestamp: Utc::now(),
            text: String::new(),
            is_terminal: true,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_entry_has_no_text() {
        let entry = LogEntry::terminal();
        assert!(entry.is_terminal());
        assert!(entry.text().is_empty());
    }

    #[test]
    fn test_entry_serialization_omits_terminal_flag() {
        let entry = LogEntry::new("Provisioning");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"text\":\"Provisioning\""));
        assert!(!json.contains("is_terminal"));

        let json = serde_json::to_string(&LogEntry::terminal()).unwrap();
        assert!(json.contains("\"is_terminal\":true"));
    }
}
