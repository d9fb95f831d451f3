use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::models::mint::MintEvent;

/// Publish/subscribe channel for freshly minted NFTs.
///
/// The creator form publishes; the chart view and the marketplace each hold
/// their own `Subscription`. Every subscriber sees every event published
/// after it subscribed, in publish order. Each subscriber has its own
/// unbounded queue, so a slow reader never loses events.
#[derive(Debug, Clone, Default)]
pub struct MintBus {
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<MintEvent>>>>,
}

impl MintBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.lock().push(sender);
        Subscription { receiver }
    }

    /// Publish an event. Returns how many subscribers it was queued for.
    /// Subscriptions that have been dropped are forgotten here.
    pub fn publish(&self, event: MintEvent) -> usize {
        let mut subscribers = self.lock();
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
        let n = subscribers.len();
        tracing::debug!(id = %event.id, subscribers = n, "published mint event");
        n
    }

    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.lock();
        subscribers.retain(|sender| !sender.is_closed());
        subscribers.len()
    }

    // No operation here can leave the list half-updated, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Vec<mpsc::UnboundedSender<MintEvent>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// One consumer's view of the bus.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<MintEvent>,
}

impl Subscription {
    /// Next queued event without waiting.
    pub fn try_next(&mut self) -> Option<MintEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait for the next event. `None` once the bus is gone and the queue
    /// is empty.
    pub async fn next(&mut self) -> Option<MintEvent> {
        self.receiver.recv().await
    }

    /// Everything queued right now, oldest first.
    pub fn drain(&mut self) -> Vec<MintEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}
