//! Chunked plain-text stream of the job log
//!
//! One line per entry, each line yielded as its own body chunk so hyper
//! flushes it immediately. If the client goes away, hyper drops the body,
//! which drops the [`Subscription`] and releases its slot. Server shutdown
//! ends the body early.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use axum::response::{IntoResponse, Response};
use futures::Stream;
use tokio::sync::watch;
use tracing::{debug, info};

use super::error::ApiError;
use super::state::{shutdown_started, AppState};
use crate::broadcaster::Subscription;

/// GET /stream-data - subscribe and stream entries until the job completes
pub async fn stream_data_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let subscription = state.broadcaster.subscribe().await?;
    if state.trigger.fire() {
        info!("First viewer connected, starting job");
    }
    debug!(subscriber = %subscription.id(), "Streaming job log");

    let headers = [
        (CONTENT_TYPE, "text/plain; charset=utf-8"),
        (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    ];
    let body = Body::from_stream(entry_lines(subscription, state.shutdown_watch()));
    Ok((headers, body).into_response())
}

/// Turn a subscription into newline-terminated entry texts.
///
/// A history snapshot expands to one line per entry. The stream ends when
/// the inbox closes or when `shutdown` turns true.
pub fn entry_lines(
    mut subscription: Subscription,
    shutdown: watch::Receiver<bool>,
) -> impl Stream<Item = Result<String, Infallible>> + Send + 'static {
    async_stream::stream! {
        let stopping = shutdown_started(shutdown);
        tokio::pin!(stopping);
        loop {
            // Buffered messages are flushed before a pending shutdown ends the body.
            let message = tokio::select! {
                biased;

                message = subscription.recv() => message,
                _ = &mut stopping => {
                    debug!(subscriber = %subscription.id(), "Server shutting down, ending stream");
                    None
                }
            };
            let Some(message) = message else { break };
            for entry in message.entries() {
                yield Ok::<_, Infallible>(format!("{}\n", entry.text()));
            }
        }
        debug!(subscriber = %subscription.id(), "Ending stream");
        subscription.unsubscribe().await;
    }
}
