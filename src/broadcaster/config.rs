//! Broadcaster tuning knobs

use std::fmt;
use std::str::FromStr;

/// Default capacity of each subscriber inbox
pub const DEFAULT_INBOX_CAPACITY: usize = 100;

/// Default capacity of the producer log channel
pub const DEFAULT_LOG_CAPACITY: usize = 100;

/// Default capacity of the subscribe/unsubscribe command channel
pub const DEFAULT_COMMAND_CAPACITY: usize = 100;

/// What the control loop does when a subscriber inbox is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlowSubscriberPolicy {
    /// Wait for room. A single stalled subscriber holds up every publish.
    #[default]
    Block,
    /// Close the full inbox and drop that subscriber; everyone else keeps going.
    Disconnect,
}

impl fmt::Display for SlowSubscriberPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlowSubscriberPolicy::Block => f.write_str("block"),
            SlowSubscriberPolicy::Disconnect => f.write_str("disconnect"),
        }
    }
}

impl FromStr for SlowSubscriberPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(SlowSubscriberPolicy::Block),
            "disconnect" | "drop" => Ok(SlowSubscriberPolicy::Disconnect),
            other => Err(format!("unknown slow subscriber policy '{}'", other)),
        }
    }
}

/// Channel sizes and the full-inbox policy for one broadcaster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcasterConfig {
    /// Messages buffered per subscriber
    pub inbox_capacity: usize,
    /// Entries buffered between the publisher and the control loop
    pub log_capacity: usize,
    /// Commands buffered between handles and the control loop
    pub command_capacity: usize,
    pub slow_subscriber_policy: SlowSubscriberPolicy,
}

impl Default for BroadcasterConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
            log_capacity: DEFAULT_LOG_CAPACITY,
            command_capacity: DEFAULT_COMMAND_CAPACITY,
            slow_subscriber_policy: SlowSubscriberPolicy::default(),
        }
    }
}

impl BroadcasterConfig {
    /// Set the per-subscriber inbox capacity
    pub fn with_inbox_capacity(mut self, capacity: usize) -> Self {
        self.inbox_capacity = capacity;
        self
    }

    /// Set the full-inbox policy
    pub fn with_policy(mut self, policy: SlowSubscriberPolicy) -> Self {
        self.slow_subscriber_policy = policy;
        self
    }

    /// tokio channels panic on zero capacity, so every size is clamped to at least one.
    pub(crate) fn normalized(mut self) -> Self {
        self.inbox_capacity = self.inbox_capacity.max(1);
        self.log_capacity = self.log_capacity.max(1);
        self.command_capacity = self.command_capacity.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!("block".parse(), Ok(SlowSubscriberPolicy::Block));
        assert_eq!(" Disconnect ".parse(), Ok(SlowSubscriberPolicy::Disconnect));
        assert!("later".parse::<SlowSubscriberPolicy>().is_err());
    }

    #[test]
    fn test_normalized_clamps_zero_capacities() {
        let config = BroadcasterConfig {
            inbox_capacity: 0,
            log_capacity: 0,
            command_capacity: 0,
            slow_subscriber_policy: SlowSubscriberPolicy::Block,
        }
        .normalized();

        assert_eq!(config.inbox_capacity, 1);
        assert_eq!(config.log_capacity, 1);
        assert_eq!(config.command_capacity, 1);
    }
}
