//! The control loop that owns the log and the subscriber set
//!
//! ```text
//! Publisher ──log_rx──┐
//!                     ├─► select! ─► one event at a time ─► fan-out to inboxes
//! Handles ──command_rx┘
//! ```
//!
//! Nothing else ever touches `log` or `subscribers`, so there are no locks.
//! Pending log entries are drained before commands, so a caller that
//! publishes and then subscribes sees its own entry in the snapshot.
//! An inbox is closed by dropping its `Sender`, and the map holds the only
//! one, so each inbox closes exactly once.

use std::collections::BTreeMap;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::command::{BroadcasterStatus, Command, SubscriberId};
use super::config::{BroadcasterConfig, SlowSubscriberPolicy};
use super::subscription::Subscription;
use crate::types::{EventLog, LogEntry, Message};

pub(crate) struct BroadcastActor {
    config: BroadcasterConfig,
    log: EventLog,
    completed: bool,
    subscribers: BTreeMap<SubscriberId, mpsc::Sender<Message>>,
    next_id: u64,
    log_rx: mpsc::Receiver<LogEntry>,
    command_rx: mpsc::Receiver<Command>,
    /// Handed to each subscription so it can unsubscribe without keeping the loop alive
    weak_commands: mpsc::WeakSender<Command>,
}

impl BroadcastActor {
    pub(crate) fn new(
        config: BroadcasterConfig,
        log_rx: mpsc::Receiver<LogEntry>,
        command_rx: mpsc::Receiver<Command>,
        weak_commands: mpsc::WeakSender<Command>,
    ) -> Self {
        Self {
            config,
            log: EventLog::new(),
            completed: false,
            subscribers: BTreeMap::new(),
            next_id: 0,
            log_rx,
            command_rx,
            weak_commands,
        }
    }

    /// Run until the producer is finished and every handle is gone.
    pub(crate) async fn run(mut self) {
        let mut commands_open = true;

        loop {
            tokio::select! {
                // Log first: an entry published before a subscribe is always
                // in that subscriber's snapshot.
                biased;

                entry = self.log_rx.recv(), if !self.completed => match entry {
                    Some(entry) => self.on_entry(entry).await,
                    None => {
                        warn!("Publisher dropped without completing the stream");
                        self.finish();
                    }
                },
                command = self.command_rx.recv(), if commands_open => match command {
                    Some(command) => self.on_command(command),
                    None => commands_open = false,
                },
                else => break,
            }
        }

        debug!(entries = self.log.len(), "Broadcaster control loop stopped");
    }

    async fn on_entry(&mut self, entry: LogEntry) {
        if entry.is_terminal() {
            self.finish();
            return;
        }

        self.log.append(entry.clone());

        let mut gone = Vec::new();
        for (id, inbox) in &self.subscribers {
            let message = Message::Entry(entry.clone());
            let delivered = match self.config.slow_subscriber_policy {
                SlowSubscriberPolicy::Block => inbox.send(message).await.is_ok(),
                SlowSubscriberPolicy::Disconnect => match inbox.try_send(message) {
                    Ok(()) => true,
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        warn!(subscriber = %id, "Inbox full, disconnecting slow subscriber");
                        false
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => false,
                },
            };
            if !delivered {
                gone.push(*id);
            }
        }

        for id in gone {
            debug!(subscriber = %id, "Pruning closed subscriber");
            self.subscribers.remove(&id);
        }
    }

    fn on_command(&mut self, command: Command) {
        match command {
            Command::Subscribe { reply } => self.subscribe(reply),
            Command::Unsubscribe { id } => self.unsubscribe(id),
            Command::Status { reply } => {
                let _ = reply.send(self.status());
            }
        }
    }

    fn subscribe(&mut self, reply: tokio::sync::oneshot::Sender<Subscription>) {
        let id = SubscriberId::new(self.next_id);
        self.next_id += 1;

        let (inbox_tx, inbox_rx) = mpsc::channel(self.config.inbox_capacity);
        if !self.log.is_empty() {
            // Fresh channel with capacity >= 1, so this cannot be full.
            let _ = inbox_tx.try_send(Message::HistorySnapshot(self.log.clone()));
        }

        let subscription = Subscription::new(id, inbox_rx, self.weak_commands.clone());
        if reply.send(subscription).is_err() {
            debug!(subscriber = %id, "Subscriber went away before registration");
            return;
        }

        if self.completed {
            // Dropping inbox_tx closes the inbox right after the snapshot.
            debug!(subscriber = %id, "Late subscriber after completion, history only");
            return;
        }

        debug!(subscriber = %id, history = self.log.len(), "Subscriber registered");
        self.subscribers.insert(id, inbox_tx);
    }

    fn unsubscribe(&mut self, id: SubscriberId) {
        match self.subscribers.remove(&id) {
            Some(_) => debug!(subscriber = %id, "Subscriber removed"),
            None => debug!(subscriber = %id, "Unsubscribe for unknown or closed subscriber"),
        }
    }

    fn finish(&mut self) {
        self.completed = true;
        self.log_rx.close();
        info!(
            entries = self.log.len(),
            subscribers = self.subscribers.len(),
            "Stream complete, closing all inboxes"
        );
        self.subscribers.clear();
    }

    fn status(&self) -> BroadcasterStatus {
        BroadcasterStatus {
            started_at: self.log.started_at(),
            entries: self.log.len(),
            subscribers: self.subscribers.len(),
            completed: self.completed,
        }
    }
}
