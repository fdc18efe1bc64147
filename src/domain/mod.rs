pub mod company;
pub mod error;
pub mod events;
pub mod ports;
pub mod user;

// Re-export commonly used types
pub use company::{Company, CompanyRepository, CompanyType};
pub use error::{DomainError, DomainResult, ResultExt};
pub use events::EventMessage;
pub use ports::{CredentialService, EventSink, TokenClaims};
pub use user::{User, UserRepository};
