//! Data types shared by the broadcaster, the job and the HTTP layer

mod entry;
mod error;
mod history;
mod message;

pub use entry::LogEntry;
pub use error::{StreamError, StreamResult};
pub use history::EventLog;
pub use message::Message;
