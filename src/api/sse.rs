//! Server-Sent Events view of the job log

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio_stream::StreamExt;

use super::error::ApiError;
use super::state::{shutdown_started, AppState};
use crate::types::Message;

/// Turn one inbox message into an SSE event
fn message_event(message: &Message) -> Event {
    match message {
        Message::HistorySnapshot(log) => Event::default()
            .event("history")
            .data(serde_json::to_string(log).unwrap_or_default()),
        Message::Entry(entry) => Event::default()
            .event("entry")
            .data(serde_json::to_string(entry).unwrap_or_default()),
    }
}

/// GET /stream-events - `history`, then `entry` events, then a final `done`.
/// Server shutdown cuts the stream short.
pub async fn stream_events_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let subscription = state.broadcaster.subscribe().await?;
    state.trigger.fire();

    let stopping = shutdown_started(state.shutdown_watch());
    let events = futures::StreamExt::take_until(subscription, stopping)
        .map(|message| Ok::<_, Infallible>(message_event(&message)))
        .chain(tokio_stream::once(Ok::<_, Infallible>(
            Event::default().event("done").data("Done!"),
        )));

    Ok(Sse::new(events).keep_alive(KeepAlive::default().interval(Duration::from_secs(15))))
}
