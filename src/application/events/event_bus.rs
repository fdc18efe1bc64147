//! Event Bus for broadcasting events to subscribers

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::domain::EventMessage;
use crate::domain::{DomainResult, EventSink};
use crate::shared::ShutdownSignal;

const DEFAULT_CAPACITY: usize = 1024;

/// Event bus for broadcasting events to all subscribers
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventMessage>,
    subscriber_count: Arc<AtomicUsize>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            subscriber_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn publish(&self, message: EventMessage) {
        let topic = message.topic.clone();
        let bytes = message.payload.len();

        match self.sender.send(message) {
            Ok(count) => {
                debug!(topic, bytes, subscribers = count, "Event published");
            }
            Err(_) => {
                debug!(topic, bytes, "Event published (no subscribers)");
            }
        }
    }

    pub fn subscribe(&self) -> EventSubscriber {
        let receiver = self.sender.subscribe();
        self.subscriber_count.fetch_add(1, Ordering::SeqCst);
        let count = self.subscriber_count.load(Ordering::SeqCst);
        info!(total = count, "New event subscriber");

        EventSubscriber {
            receiver,
            subscriber_count: self.subscriber_count.clone(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriber_count.load(Ordering::SeqCst)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for EventBus {
    async fn send_event(&self, topic: &str, payload: Vec<u8>) -> DomainResult<()> {
        self.publish(EventMessage::new(topic, payload));
        Ok(())
    }
}

/// Event subscriber that receives events from the bus
pub struct EventSubscriber {
    receiver: broadcast::Receiver<EventMessage>,
    subscriber_count: Arc<AtomicUsize>,
}

impl EventSubscriber {
    pub async fn recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(msg) => return Some(msg),
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(missed = count, "Subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return None;
                }
            }
        }
    }
}

impl Drop for EventSubscriber {
    fn drop(&mut self) {
        let prev = self.subscriber_count.fetch_sub(1, Ordering::SeqCst);
        info!(remaining = prev - 1, "Event subscriber disconnected");
    }
}

/// Shared event bus type
pub type SharedEventBus = Arc<EventBus>;

/// Create a shared event bus
pub fn create_event_bus(capacity: usize) -> SharedEventBus {
    Arc::new(EventBus::with_capacity(capacity))
}

/// Log every event on the bus until shutdown.
pub fn spawn_event_logger(bus: &EventBus, shutdown: ShutdownSignal) -> tokio::task::JoinHandle<()> {
    let mut subscriber = bus.subscribe();
    tokio::spawn(async move {
        let stop = shutdown.notified().wait();
        tokio::pin!(stop);
        loop {
            tokio::select! {
                _ = &mut stop => break,
                message = subscriber.recv() => {
                    let Some(message) = message else { break };
                    let payload = String::from_utf8_lossy(&message.payload);
                    info!(topic = %message.topic, payload = %payload, "Event delivered");
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_event_reaches_subscriber() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.send_event("delete-company", b"\"abc\"".to_vec())
            .await
            .unwrap();

        let msg = sub.recv().await.unwrap();
        assert_eq!(msg.topic, "delete-company");
        assert_eq!(msg.payload_json(), Some(serde_json::json!("abc")));
    }

    #[tokio::test]
    async fn test_send_without_subscribers_succeeds() {
        let bus = EventBus::with_capacity(4);
        assert!(bus.send_event("create-company", Vec::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_subscriber_count_drops() {
        let bus = EventBus::new();
        {
            let _a = bus.subscribe();
            let _b = bus.subscribe();
            assert_eq!(bus.subscriber_count(), 2);
        }
        assert_eq!(bus.subscriber_count(), 0);
    }
}
