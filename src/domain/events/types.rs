//! Event topics and the envelope delivered to subscribers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload: the new company id.
pub const TOPIC_CREATE_COMPANY: &str = "create-company";
/// Payload: the full updated company record.
pub const TOPIC_UPDATE_COMPANY: &str = "update-company";
/// Payload: the deleted company id.
pub const TOPIC_DELETE_COMPANY: &str = "delete-company";

/// An event as handed to the sink: topic plus JSON-encoded payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub topic: String,
    pub payload: Vec<u8>,
    pub timestamp: DateTime<Utc>,
}

impl EventMessage {
    pub fn new(topic: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            topic: topic.into(),
            payload,
            timestamp: Utc::now(),
        }
    }

    /// Payload decoded back into JSON, if it is valid JSON.
    pub fn payload_json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.payload).ok()
    }
}
