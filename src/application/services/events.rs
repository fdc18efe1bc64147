//! Event service: serializes payloads before handing them to the sink

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{DomainError, DomainResult, EventSink};

#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Encode `payload` as JSON and send it on `topic`.
    async fn publish<T>(&self, topic: &str, payload: &T) -> DomainResult<()>
    where
        T: Serialize + Sync + ?Sized;
}

pub struct EventService<S: EventSink> {
    sink: Arc<S>,
}

impl<S: EventSink> EventService<S> {
    pub fn new(sink: Arc<S>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl<S: EventSink> EventPublisher for EventService<S> {
    async fn publish<T>(&self, topic: &str, payload: &T) -> DomainResult<()>
    where
        T: Serialize + Sync + ?Sized,
    {
        let message = serde_json::to_vec(payload)
            .map_err(|e| DomainError::Emission(format!("cannot encode payload: {}", e)))?;
        self.sink.send_event(topic, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::EventBus;

    #[tokio::test]
    async fn test_publish_encodes_json() {
        let bus = Arc::new(EventBus::new());
        let mut subscriber = bus.subscribe();
        let service = EventService::new(bus);

        service
            .publish("create-company", &serde_json::json!({"id": 1}))
            .await
            .unwrap();

        let message = subscriber.recv().await.unwrap();
        assert_eq!(message.topic, "create-company");
        assert_eq!(message.payload, br#"{"id":1}"#.to_vec());
    }
}
