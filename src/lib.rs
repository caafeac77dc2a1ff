//! Job Stream
//!
//! Runs one background job and streams its log to any number of HTTP
//! viewers. Viewers that arrive late first get everything logged so far,
//! then follow along live, and every stream ends when the job completes.
//!
//! # Modules
//!
//! - `types`: log entries, the event log and inbox messages
//! - `broadcaster`: the single-writer, multi-reader control loop
//! - `job`: the simulated timed job and its start gate
//! - `api`: pages, chunked and SSE streaming endpoints
//! - `config`: environment configuration
//! - `utils`: time formatting
//!
//! # Example
//!
//! ```no_run
//! use job_stream::{Broadcaster, BroadcasterConfig, Message};
//!
//! # async fn demo() -> job_stream::StreamResult<()> {
//! let (broadcaster, publisher) = Broadcaster::spawn(BroadcasterConfig::default());
//! let mut subscription = broadcaster.subscribe().await?;
//!
//! publisher.publish("Provisioning").await?;
//! publisher.complete().await?;
//!
//! while let Some(message) = subscription.recv().await {
//!     if let Message::Entry(entry) = message {
//!         println!("{}", entry.text());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod broadcaster;
pub mod config;
pub mod job;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use broadcaster::{
    Broadcaster, BroadcasterConfig, BroadcasterStatus, Publisher, SlowSubscriberPolicy,
    SubscriberId, Subscription,
};
pub use config::AppConfig;
pub use types::{EventLog, LogEntry, Message, StreamError, StreamResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
