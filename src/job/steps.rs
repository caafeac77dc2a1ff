//! The fixed sequence of timed steps the demo job walks through

use std::time::Duration;

/// One step: a log line, then a pause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStep {
    pub message: String,
    pub delay: Duration,
}

impl JobStep {
    pub fn new(message: impl Into<String>, delay: Duration) -> Self {
        Self {
            message: message.into(),
            delay,
        }
    }

    /// Delay multiplied by `scale`; negative or non-finite scales mean no delay
    pub fn scaled_delay(&self, scale: f64) -> Duration {
        if !scale.is_finite() || scale <= 0.0 {
            return Duration::ZERO;
        }
        self.delay.mul_f64(scale)
    }
}

/// Seconds to wait after each numbered "Doing stuff" step
const STUFF_DELAYS: [u64; 17] = [2, 3, 1, 5, 6, 10, 1, 2, 1, 2, 2, 1, 5, 4, 8, 10, 1];

/// The default job: provisioning, start-up, seventeen work steps, then done
pub fn default_steps() -> Vec<JobStep> {
    let mut steps = Vec::with_capacity(STUFF_DELAYS.len() + 3);
    steps.push(JobStep::new("Provisioning", Duration::from_secs(5)));
    steps.push(JobStep::new("Starting...", Duration::from_secs(5)));
    for (i, secs) in STUFF_DELAYS.iter().enumerate() {
        steps.push(JobStep::new(
            format!("Doing stuff {}...", i + 1),
            Duration::from_secs(*secs),
        ));
    }
    steps.push(JobStep::new("Done...", Duration::from_secs(2)));
    steps
}
