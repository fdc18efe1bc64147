//! # Companies Service
//!
//! REST service for company records with token-gated mutations and a
//! change-event stream.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Entities, validation rules, ports and the error taxonomy
//! - **application**: Services, usecases and the in-process event bus
//! - **infrastructure**: SeaORM stores, in-memory stores, JWT and bcrypt
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Pagination and graceful shutdown helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, run_migrations, DatabaseConfig};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiDoc, ApiState};

pub use application::{create_event_bus, EventBus, SharedEventBus};
pub use domain::{DomainError, DomainResult};
