//! Producer-side handle

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;

use crate::types::{LogEntry, StreamError, StreamResult};

/// The single writer of a broadcaster's log.
///
/// Not `Clone`: there is exactly one producer per broadcaster.
#[derive(Debug)]
pub struct Publisher {
    log_tx: mpsc::Sender<LogEntry>,
    completed: AtomicBool,
}

impl Publisher {
    pub(crate) fn new(log_tx: mpsc::Sender<LogEntry>) -> Self {
        Self {
            log_tx,
            completed: AtomicBool::new(false),
        }
    }

    /// Append `text` to the log, stamped with the current time.
    ///
    /// Waits while the log channel is full. Fails with `InvalidState` after `complete()`.
    pub async fn publish(&self, text: impl Into<String>) -> StreamResult<()> {
        if self.completed.load(Ordering::SeqCst) {
            return Err(StreamError::InvalidState(
                "publish called after complete".to_string(),
            ));
        }
        self.send(LogEntry::new(text)).await
    }

    /// Mark the stream finished; every open inbox is closed.
    ///
    /// A second call fails with `InvalidState`.
    pub async fn complete(&self) -> StreamResult<()> {
        if self.completed.swap(true, Ordering::SeqCst) {
            return Err(StreamError::InvalidState(
                "complete called more than once".to_string(),
            ));
        }
        self.send(LogEntry::terminal()).await
    }

    async fn send(&self, entry: LogEntry) -> StreamResult<()> {
        self.log_tx
            .send(entry)
            .await
            .map_err(|_| StreamError::BroadcasterGone)
    }
}
