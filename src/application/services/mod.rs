//! Application services
//!
//! Thin, stateless wrappers over the stores and the event sink.

pub mod company;
pub mod events;
pub mod user;

pub use company::{CompanyOperations, CompanyService};
pub use events::{EventPublisher, EventService};
pub use user::{UserOperations, UserService};
