//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod storage;

pub use crypto::{JwtConfig, JwtCredentialService};
pub use database::{
    init_database, run_migrations, DatabaseConfig, SeaOrmCompanyRepository, SeaOrmUserRepository,
};
pub use storage::{InMemoryCompanyRepository, InMemoryUserRepository};
