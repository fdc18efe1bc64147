use async_trait::async_trait;

use crate::domain::DomainResult;

/// Fire-and-forget sink for already-serialized events.
///
/// A failed send surfaces as `Emission`. Implementations do not retry,
/// buffer, or order events across topics.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn send_event(&self, topic: &str, payload: Vec<u8>) -> DomainResult<()>;
}
