//! Application events (pub/sub)
//!
//! Topic names and the envelope type are defined in `domain::events`.
//! The `EventBus` implementation (broadcast channel) lives here and is the
//! in-process [`EventSink`](crate::domain::EventSink) the service ships with.

pub mod event_bus;

pub use crate::domain::events::types::*;

pub use event_bus::{create_event_bus, spawn_event_logger, EventBus, EventSubscriber, SharedEventBus};
