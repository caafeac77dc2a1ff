//! Shared application state

use tokio::sync::watch;

use super::error::ApiError;
use super::pages::Pages;
use crate::broadcaster::Broadcaster;
use crate::job::StartTrigger;

/// Shared state for all HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// Handle to the job log broadcaster
    pub broadcaster: Broadcaster,
    /// Fired by the first stream request to start the job
    pub trigger: StartTrigger,
    pub pages: Pages,
    /// Flipped to true when the server starts shutting down; open streams end on it
    shutdown: watch::Sender<bool>,
}

impl AppState {
    pub fn new(broadcaster: Broadcaster, trigger: StartTrigger) -> Result<Self, ApiError> {
        Ok(Self {
            broadcaster,
            trigger,
            pages: Pages::new()?,
            shutdown: watch::channel(false).0,
        })
    }

    /// End every open stream body so graceful shutdown does not wait for the job
    pub fn begin_shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    pub(crate) fn shutdown_watch(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }
}

/// Resolves once shutdown has begun, or right away if it already has
pub(crate) async fn shutdown_started(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stopping| *stopping).await;
}
