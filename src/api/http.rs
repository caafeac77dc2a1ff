//! HTTP server setup with Axum

use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::error::ApiError;
use super::state::AppState;
use super::{pages, sse, stream};
use crate::broadcaster::BroadcasterStatus;
use crate::config::AppConfig;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(pages::home_handler))
        .route("/stream", get(pages::stream_page_handler))
        .route("/stream-data", get(stream::stream_data_handler))
        .route("/stream-events", get(sse::stream_events_handler))
        .route("/api/status", get(status_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// GET /api/status - broadcaster progress as JSON
async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BroadcasterStatus>, ApiError> {
    Ok(Json(state.broadcaster.status().await?))
}

/// Errors that can occur when starting or running the server
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("bind error: {0}")]
    Bind(String),

    #[error("serve error: {0}")]
    Serve(String),
}

/// Bind to the configured address and serve until `shutdown` resolves.
///
/// Once it resolves, open stream bodies are ended so in-flight viewers do
/// not hold the process open until the job completes.
pub async fn start_server<F>(
    config: &AppConfig,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {}: {}", addr, e)))?;

    info!(%addr, "Starting web server");

    let router = create_router(state.clone());
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.await;
            state.begin_shutdown();
        })
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcaster::{Broadcaster, BroadcasterConfig};
    use crate::job::start_gate;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let (broadcaster, _publisher) = Broadcaster::spawn(BroadcasterConfig::default());
        let (trigger, _signal) = start_gate();
        let state = Arc::new(AppState::new(broadcaster, trigger).unwrap());
        let app = create_router(state);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
    }
}
