// Live event broadcast hub
//
// Fans each newly stored event out to every connected stream subscriber.
// Built on tokio::sync::broadcast: one ring buffer, one independent cursor
// per subscriber, so a stalled consumer never blocks publish, the ingesting
// producer, or its peers.
//
// Cutoff policy: drop-oldest. A subscriber that falls more than the ring
// capacity behind loses its oldest unread events (for that subscriber only)
// and receives an Overrun notice with the count before resuming.

use lookout_core::EventRecord;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

/// Broadcast hub holding the shared ring buffer
pub struct EventHub {
    tx: broadcast::Sender<EventRecord>,
}

/// One message on a live subscription
#[derive(Debug, Clone)]
pub enum StreamMessage {
    /// A stored event, delivered in id order
    Event(EventRecord),
    /// The subscriber fell behind and `missed` events were dropped for it
    Overrun { missed: u64 },
}

/// Handle for one live subscriber. Dropping it deregisters the subscriber
/// and releases its cursor.
pub struct Subscription {
    id: Uuid,
    rx: broadcast::Receiver<EventRecord>,
}

impl EventHub {
    /// Create a hub whose subscribers may lag up to `capacity` events
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Deliver `record` to every current subscriber without blocking.
    /// Returns the number of subscribers reached; zero is not an error.
    pub fn publish(&self, record: EventRecord) -> usize {
        match self.tx.send(record) {
            Ok(reached) => reached,
            // No receivers connected
            Err(_) => 0,
        }
    }

    /// Register a subscriber starting at the current head (no replay)
    pub fn subscribe(&self) -> Subscription {
        let subscription = Subscription {
            id: Uuid::now_v7(),
            rx: self.tx.subscribe(),
        };
        tracing::debug!(subscriber_id = %subscription.id, "stream subscriber registered");
        subscription
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for the next message. Suspends until an event is published;
    /// cancel-safe. Returns `None` once the hub is gone and every buffered
    /// event has been drained.
    pub async fn next(&mut self) -> Option<StreamMessage> {
        match self.rx.recv().await {
            Ok(record) => Some(StreamMessage::Event(record)),
            Err(RecvError::Lagged(missed)) => Some(StreamMessage::Overrun { missed }),
            Err(RecvError::Closed) => None,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        tracing::debug!(subscriber_id = %self.id, "stream subscriber deregistered");
    }
}
