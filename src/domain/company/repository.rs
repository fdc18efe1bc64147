use async_trait::async_trait;
use uuid::Uuid;

use super::Company;
use crate::domain::DomainResult;

/// Persistence contract for companies.
///
/// - `get`, `update` and `delete` on an unknown id fail with `NotFound`.
/// - `list` past the last row returns an empty vec, never an error.
/// - `update` replaces the whole record; the id parameter is authoritative.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn create(&self, company: Company) -> DomainResult<Uuid>;
    async fn get(&self, id: Uuid) -> DomainResult<Company>;
    async fn list(&self, limit: u64, offset: u64) -> DomainResult<Vec<Company>>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
    async fn update(&self, id: Uuid, company: Company) -> DomainResult<()>;
}
