//! Consumer-side subscription handle

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::command::{Command, SubscriberId};
use crate::types::Message;

/// One observer's inbox and identity.
///
/// Drain it with [`recv`](Self::recv) or as a [`Stream`]; it ends when the
/// broadcaster closes the inbox. The slot is released by
/// [`unsubscribe`](Self::unsubscribe) or, failing that, when the handle is dropped.
pub struct Subscription {
    id: SubscriberId,
    inbox: mpsc::Receiver<Message>,
    owner: mpsc::WeakSender<Command>,
    released: bool,
}

impl Subscription {
    pub(crate) fn new(
        id: SubscriberId,
        inbox: mpsc::Receiver<Message>,
        owner: mpsc::WeakSender<Command>,
    ) -> Self {
        Self {
            id,
            inbox,
            owner,
            released: false,
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Next message, or `None` once the inbox is closed and drained
    pub async fn recv(&mut self) -> Option<Message> {
        self.inbox.recv().await
    }

    /// Release the slot now.
    ///
    /// Closing our end first lets a control loop that is blocked on this
    /// inbox move on before it reads the command. Unsubscribing after the
    /// broadcaster completed or stopped is a no-op.
    pub async fn unsubscribe(mut self) {
        self.released = true;
        self.inbox.close();
        if let Some(owner) = self.owner.upgrade() {
            if owner.send(Command::Unsubscribe { id: self.id }).await.is_err() {
                debug!(subscriber = %self.id, "Broadcaster stopped before unsubscribe");
            }
        }
    }
}

impl Stream for Subscription {
    type Item = Message;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Message>> {
        self.inbox.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.inbox.close();
        let Some(owner) = self.owner.upgrade() else {
            return;
        };
        match owner.try_send(Command::Unsubscribe { id: self.id }) {
            Ok(()) => debug!(subscriber = %self.id, "Subscription dropped, unsubscribing"),
            Err(mpsc::error::TrySendError::Full(_)) => {
                // The closed inbox gets pruned on the next publish instead.
                warn!(subscriber = %self.id, "Command channel full, deferring unsubscribe");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {}
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("released", &self.released)
            .finish()
    }
}
