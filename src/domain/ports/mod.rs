//! Domain ports (hexagonal architecture boundaries)
//!
//! Contracts for the collaborators the usecases depend on but do not own:
//! the credential primitive and the event sink.

pub mod credentials;
pub mod events;

pub use credentials::{CredentialService, TokenClaims};
pub use events::EventSink;
