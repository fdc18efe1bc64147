//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories.

pub mod company_repository;
pub mod user_repository;

pub use company_repository::SeaOrmCompanyRepository;
pub use user_repository::SeaOrmUserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

fn db_err(e: DbErr) -> DomainError {
    DomainError::Store(format!("Database error: {}", e))
}

fn is_unique_violation(e: &DbErr) -> bool {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }
    let message = e.to_string();
    message.contains("UNIQUE") || message.contains("duplicate")
}
