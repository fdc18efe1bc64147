//! Event sinks used by unit tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{DomainError, DomainResult, EventSink};

/// Records every event it receives.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<(String, Vec<u8>)> {
        self.events.lock().unwrap().clone()
    }

    pub fn topics(&self) -> Vec<String> {
        self.events().into_iter().map(|(topic, _)| topic).collect()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn send_event(&self, topic: &str, payload: Vec<u8>) -> DomainResult<()> {
        self.events.lock().unwrap().push((topic.to_string(), payload));
        Ok(())
    }
}

/// Rejects every event.
pub struct FailingSink;

#[async_trait]
impl EventSink for FailingSink {
    async fn send_event(&self, topic: &str, _payload: Vec<u8>) -> DomainResult<()> {
        Err(DomainError::Emission(format!("broker unavailable for {}", topic)))
    }
}
