//! Messages delivered to subscriber inboxes

use serde::Serialize;

use super::{EventLog, LogEntry};

/// What a subscriber receives.
///
/// An inbox holds at most one `HistorySnapshot`, and only as its first message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Message {
    /// Every entry appended before the subscription was registered
    HistorySnapshot(EventLog),
    /// One entry published after the subscription was registered
    Entry(LogEntry),
}

impl Message {
    /// Entries carried by this message, in log order
    pub fn entries(&self) -> &[LogEntry] {
        match self {
            Message::HistorySnapshot(log) => log.entries(),
            Message::Entry(entry) => std::slice::from_ref(entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_entries_flatten_snapshot() {
        let mut log = EventLog::new();
        log.append(LogEntry::new("A"));
        log.append(LogEntry::new("B"));

        let snapshot = Message::HistorySnapshot(log);
        let texts: Vec<&str> = snapshot
            .entries()
            .iter()
            .map(LogEntry::text)
            .collect();
        assert_eq!(texts, vec!["A", "B"]);

        let single = Message::Entry(LogEntry::new("C"));
        assert_eq!(single.entries().len(), 1);
    }

    #[test]
    fn test_message_serialization_is_tagged() {
        let json = serde_json::to_string(&Message::Entry(LogEntry::new("A"))).unwrap();
        assert!(json.contains("\"type\":\"entry\""));
    }
}
