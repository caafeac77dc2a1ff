//! Error types for the broadcaster core

/// Errors returned by broadcaster and publisher handles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// The producer contract was violated (publish after complete, or a second complete).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The control loop has stopped and can no longer be reached.
    #[error("broadcaster is no longer running")]
    BroadcasterGone,
}

/// Result type for broadcaster operations
pub type StreamResult<T> = Result<T, StreamError>;
