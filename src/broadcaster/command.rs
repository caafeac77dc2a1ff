//! Commands accepted by the control loop

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::oneshot;

use super::subscription::Subscription;

/// Identity of one subscription.
///
/// Allocated from a counter owned by the control loop, so an id is never
/// handed out twice during a broadcaster's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    pub(crate) fn new(seq: u64) -> Self {
        Self(seq)
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

impl Serialize for SubscriberId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Read-only view of the broadcaster, answered by the control loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BroadcasterStatus {
    pub started_at: Option<DateTime<Utc>>,
    pub entries: usize,
    pub subscribers: usize,
    pub completed: bool,
}

/// The only way for handles to reach broadcaster state
pub(crate) enum Command {
    Subscribe {
        reply: oneshot::Sender<Subscription>,
    },
    Unsubscribe {
        id: SubscriberId,
    },
    Status {
        reply: oneshot::Sender<BroadcasterStatus>,
    },
}
