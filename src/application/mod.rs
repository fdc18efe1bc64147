pub mod events;
pub mod services;
pub mod usecases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types for convenience
pub use events::{create_event_bus, spawn_event_logger, EventBus, EventSubscriber, SharedEventBus};
pub use services::{
    CompanyOperations, CompanyService, EventPublisher, EventService, UserOperations, UserService,
};
pub use usecases::{AuthUsecase, AuthUsecases, CompanyUsecase, CompanyUsecases};
