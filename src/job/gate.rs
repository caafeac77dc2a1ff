//! One-shot start gate: the job waits for its first viewer

use parking_lot::Mutex;
use tokio::sync::oneshot;

/// Create a linked trigger/signal pair
pub fn start_gate() -> (StartTrigger, StartSignal) {
    let (tx, rx) = oneshot::channel();
    (
        StartTrigger {
            tx: Mutex::new(Some(tx)),
        },
        StartSignal { rx },
    )
}

/// Held by the HTTP layer; the first `fire` starts the job
#[derive(Debug)]
pub struct StartTrigger {
    tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl StartTrigger {
    /// Returns true only for the call that actually released the job
    pub fn fire(&self) -> bool {
        match self.tx.lock().take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }
}

/// Held by the job
#[derive(Debug)]
pub struct StartSignal {
    rx: oneshot::Receiver<()>,
}

impl StartSignal {
    /// Wait for the trigger. Returns false if it was dropped without firing.
    pub async fn wait(self) -> bool {
        self.rx.await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_only_first_fire_counts() {
        let (trigger, signal) = start_gate();
        assert!(trigger.fire());
        assert!(!trigger.fire());
        assert!(signal.wait().await);
    }

    #[tokio::test]
    async fn test_dropped_trigger_never_starts() {
        let (trigger, signal) = start_gate();
        drop(trigger);
        assert!(!signal.wait().await);
    }
}
