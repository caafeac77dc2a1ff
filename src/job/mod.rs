//! Simulated background job that feeds the broadcaster
//!
//! The job sits behind a [`StartSignal`] until the first viewer opens the
//! stream, then publishes one entry per [`JobStep`] and completes.

mod gate;
mod steps;

pub use gate::{start_gate, StartSignal, StartTrigger};
pub use steps::{default_steps, JobStep};

use tracing::info;

use crate::broadcaster::Publisher;
use crate::types::StreamResult;

/// Run `steps` once the gate opens, then complete the stream.
///
/// If the trigger is dropped without firing, the job returns without
/// publishing and dropping `publisher` completes the stream.
pub async fn run_job(
    publisher: Publisher,
    steps: Vec<JobStep>,
    delay_scale: f64,
    signal: StartSignal,
) -> StreamResult<()> {
    if !signal.wait().await {
        info!("Start trigger dropped, job never ran");
        return Ok(());
    }
    info!(steps = steps.len(), "Running!");

    for step in &steps {
        publisher.publish(step.message.as_str()).await?;
        info!("{}", step.message);
        tokio::time::sleep(step.scaled_delay(delay_scale)).await;
    }

    publisher.complete().await?;
    info!("Job finished");
    Ok(())
}
