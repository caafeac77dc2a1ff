//! Job Stream Server - Binary Entry Point
//!
//! Starts the broadcaster, parks the job behind the start gate and serves
//! the HTTP endpoints until Ctrl+C.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use job_stream::api::{start_server, AppState};
use job_stream::job::{default_steps, run_job, start_gate};
use job_stream::{AppConfig, Broadcaster};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = AppConfig::from_env()?;
    info!(
        address = %config.bind_address(),
        inbox_capacity = config.broadcaster.inbox_capacity,
        policy = %config.broadcaster.slow_subscriber_policy,
        step_delay_scale = config.step_delay_scale,
        "Configuration loaded"
    );

    let (broadcaster, publisher) = Broadcaster::spawn(config.broadcaster.clone());
    let (trigger, signal) = start_gate();

    let steps = default_steps();
    let scale = config.step_delay_scale;
    tokio::spawn(async move {
        if let Err(e) = run_job(publisher, steps, scale, signal).await {
            error!(error = %e, "Job aborted");
        }
    });

    let state = Arc::new(AppState::new(broadcaster, trigger)?);
    start_server(&config, state, shutdown_signal()?).await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on the first Ctrl+C / SIGTERM
fn shutdown_signal() -> Result<impl std::future::Future<Output = ()>, ctrlc::Error> {
    let (tx, rx) = oneshot::channel::<()>();
    let tx = Mutex::new(Some(tx));
    ctrlc::set_handler(move || {
        if let Some(tx) = tx.lock().take() {
            let _ = tx.send(());
        }
    })?;

    Ok(async move {
        if rx.await.is_err() {
            warn!("Shutdown handler dropped");
            return;
        }
        info!("Shutdown requested");
    })
}
