pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::{SeaOrmCompanyRepository, SeaOrmUserRepository};

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migrator::Migrator;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./companies.db?mode=rwc")
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./companies.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    /// Private in-memory SQLite database, gone when the pool closes.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

/// Lifetime given to the single in-memory connection. The pool's default
/// (30 min) would silently swap in a fresh, empty database.
const IN_MEMORY_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

fn connect_options(config: &DatabaseConfig) -> ConnectOptions {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    // Every connection to an in-memory SQLite database sees its own
    // empty database, so the pool must hold exactly one and keep it.
    if config.is_in_memory() {
        options
            .max_connections(1)
            .min_connections(1)
            .max_lifetime(IN_MEMORY_LIFETIME)
            .idle_timeout(IN_MEMORY_LIFETIME);
    } else {
        options.max_connections(config.max_connections.max(1));
    }
    options
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!(url = %config.url, "Connecting to database");

    let db = Database::connect(connect_options(config)).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Apply pending migrations.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    info!("Running database migrations");
    Migrator::up(db, None).await?;
    info!("Migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_connection_is_never_recycled() {
        let options = connect_options(&DatabaseConfig::in_memory());
        assert_eq!(options.get_max_connections(), Some(1));
        assert_eq!(options.get_min_connections(), Some(1));
        assert_eq!(options.get_max_lifetime(), Some(IN_MEMORY_LIFETIME));
        assert_eq!(options.get_idle_timeout(), Some(IN_MEMORY_LIFETIME));
    }

    #[test]
    fn file_database_keeps_pool_defaults() {
        let options = connect_options(&DatabaseConfig::default());
        assert_eq!(options.get_max_connections(), Some(10));
        assert_eq!(options.get_max_lifetime(), None);
        assert_eq!(options.get_idle_timeout(), None);
    }
}
