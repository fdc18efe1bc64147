//! Company service: domain-facing wrapper over the company store
//!
//! Pure delegation today. This is the seam where domain validation goes
//! without touching orchestration (usecases) or persistence (repositories).

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Company, CompanyRepository, DomainResult, ResultExt};

#[async_trait]
pub trait CompanyOperations: Send + Sync {
    async fn create(&self, company: Company) -> DomainResult<Uuid>;
    async fn get(&self, id: Uuid) -> DomainResult<Company>;
    async fn list(&self, limit: u64, offset: u64) -> DomainResult<Vec<Company>>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
    async fn update(&self, id: Uuid, company: Company) -> DomainResult<()>;
}

/// Generic over `R: CompanyRepository` so it stays decoupled from
/// the concrete persistence layer.
pub struct CompanyService<R: CompanyRepository> {
    repo: Arc<R>,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: CompanyRepository> CompanyOperations for CompanyService<R> {
    async fn create(&self, company: Company) -> DomainResult<Uuid> {
        self.repo.create(company).await.context("company service: create")
    }

    async fn get(&self, id: Uuid) -> DomainResult<Company> {
        self.repo.get(id).await.context("company service: get")
    }

    async fn list(&self, limit: u64, offset: u64) -> DomainResult<Vec<Company>> {
        self.repo
            .list(limit, offset)
            .await
            .context("company service: list")
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.repo.delete(id).await.context("company service: delete")
    }

    async fn update(&self, id: Uuid, company: Company) -> DomainResult<()> {
        self.repo
            .update(id, company)
            .await
            .context("company service: update")
    }
}
