//! HTTP surface: pages, the chunked log stream, SSE and status
//!
//! ## Endpoints
//! - `GET /` - home page
//! - `GET /stream` - page that renders the live job log
//! - `GET /stream-data` - chunked `text/plain`, one line per entry
//! - `GET /stream-events` - the same log as Server-Sent Events
//! - `GET /api/status` - broadcaster status JSON
//! - `GET /health` - liveness

pub mod error;
pub mod http;
pub mod pages;
pub mod sse;
pub mod state;
pub mod stream;

pub use error::ApiError;
pub use http::{create_router, start_server, ServerError};
pub use state::AppState;
