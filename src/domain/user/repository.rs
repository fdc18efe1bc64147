use async_trait::async_trait;

use super::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. A duplicate email fails with `Conflict`.
    async fn create(&self, user: User) -> DomainResult<User>;

    /// Look a user up by email. An unknown email fails with `NotFound`.
    async fn get_by_email(&self, email: &str) -> DomainResult<User>;
}
