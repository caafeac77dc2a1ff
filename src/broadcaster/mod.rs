//! Single-writer, multi-reader job log broadcaster
//!
//! [`Broadcaster::spawn`] starts one control loop and returns two kinds of handle:
//! - [`Broadcaster`]: cloneable, used by stream consumers to subscribe
//! - [`Publisher`]: the one producer, which publishes entries and completes the stream
//!
//! Every subscriber sees entries in the same order. A subscriber that joins late
//! first gets a single [`Message::HistorySnapshot`](crate::types::Message) with
//! everything published so far.

mod actor;
pub mod command;
pub mod config;
mod publisher;
mod subscription;

pub use command::{BroadcasterStatus, SubscriberId};
pub use config::{BroadcasterConfig, SlowSubscriberPolicy};
pub use publisher::Publisher;
pub use subscription::Subscription;

use tokio::sync::{mpsc, oneshot};

use crate::types::{StreamError, StreamResult};
use actor::BroadcastActor;
use command::Command;

/// Consumer-facing handle to a running broadcaster
#[derive(Debug, Clone)]
pub struct Broadcaster {
    command_tx: mpsc::Sender<Command>,
}

impl Broadcaster {
    /// Start a control loop on the current tokio runtime.
    pub fn spawn(config: BroadcasterConfig) -> (Broadcaster, Publisher) {
        let config = config.normalized();
        let (log_tx, log_rx) = mpsc::channel(config.log_capacity);
        let (command_tx, command_rx) = mpsc::channel(config.command_capacity);

        let actor = BroadcastActor::new(config, log_rx, command_rx, command_tx.downgrade());
        tokio::spawn(actor.run());

        (Broadcaster { command_tx }, Publisher::new(log_tx))
    }

    /// Register a new subscriber.
    ///
    /// The returned inbox starts with a history snapshot when entries already
    /// exist. After completion the inbox is closed once that snapshot is read.
    pub async fn subscribe(&self) -> StreamResult<Subscription> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(Command::Subscribe { reply })
            .await
            .map_err(|_| StreamError::BroadcasterGone)?;
        rx.await.map_err(|_| StreamError::BroadcasterGone)
    }

    /// Release a subscriber slot by id. Unknown or already closed ids are ignored.
    pub async fn unsubscribe(&self, id: SubscriberId) {
        let _ = self.command_tx.send(Command::Unsubscribe { id }).await;
    }

    /// Snapshot of the log length, subscriber count and completion flag
    pub async fn status(&self) -> StreamResult<BroadcasterStatus> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(Command::Status { reply })
            .await
            .map_err(|_| StreamError::BroadcasterGone)?;
        rx.await.map_err(|_| StreamError::BroadcasterGone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Message;
    use std::time::Duration;
    use tokio::time::timeout;

    fn texts(message: &Message) -> Vec<String> {
        message.entries().iter().map(|e| e.text().to_string()).collect()
    }

    #[tokio::test]
    async fn test_status_tracks_log_and_subscribers() {
        let (broadcaster, publisher) = Broadcaster::spawn(BroadcasterConfig::default());

        let status = broadcaster.status().await.unwrap();
        assert_eq!(status.entries, 0);
        assert!(status.started_at.is_none());

        let mut sub = broadcaster.subscribe().await.unwrap();
        publisher.publish("Provisioning").await.unwrap();
        assert_eq!(texts(&sub.recv().await.unwrap()), vec!["Provisioning"]);

        let status = broadcaster.status().await.unwrap();
        assert_eq!(status.entries, 1);
        assert_eq!(status.subscribers, 1);
        assert!(status.started_at.is_some());
        assert!(!status.completed);
    }

    #[tokio::test]
    async fn test_dropping_subscription_releases_slot() {
        let (broadcaster, _publisher) = Broadcaster::spawn(BroadcasterConfig::default());

        let sub = broadcaster.subscribe().await.unwrap();
        assert_eq!(broadcaster.status().await.unwrap().subscribers, 1);

        drop(sub);
        assert_eq!(broadcaster.status().await.unwrap().subscribers, 0);
    }

    #[tokio::test]
    async fn test_dropped_publisher_completes_stream() {
        let (broadcaster, publisher) = Broadcaster::spawn(BroadcasterConfig::default());
        let mut sub = broadcaster.subscribe().await.unwrap();

        publisher.publish("A").await.unwrap();
        drop(publisher);

        assert_eq!(texts(&sub.recv().await.unwrap()), vec!["A"]);
        let end = timeout(Duration::from_secs(1), sub.recv()).await.unwrap();
        assert!(end.is_none());
        assert!(broadcaster.status().await.unwrap().completed);
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let (broadcaster, _publisher) = Broadcaster::spawn(BroadcasterConfig::default());

        let first = broadcaster.subscribe().await.unwrap();
        let first_id = first.id();
        first.unsubscribe().await;

        let second = broadcaster.subscribe().await.unwrap();
        assert_ne!(first_id, second.id());
    }

    #[tokio::test]
    async fn test_subscriptions_outlive_broadcaster_handles() {
        let (broadcaster, publisher) = Broadcaster::spawn(BroadcasterConfig::default());
        let mut sub = broadcaster.subscribe().await.unwrap();
        drop(broadcaster);

        publisher.publish("still here").await.unwrap();
        publisher.complete().await.unwrap();

        assert_eq!(texts(&sub.recv().await.unwrap()), vec!["still here"]);
        assert!(sub.recv().await.is_none());
        sub.unsubscribe().await;
    }
}
