//! Company usecase: orchestrates company mutations and their events
//!
//! Every mutation is two sequential, separately fallible steps:
//!
//! 1. persist through the company service;
//! 2. emit an event describing the change.
//!
//! The steps are not atomic. If step 2 fails the error is returned to the
//! caller even though the change is already stored, and nothing is rolled
//! back. Callers must treat such an error as "mutation state unknown".

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::services::{CompanyOperations, EventPublisher};
use crate::domain::events::{TOPIC_CREATE_COMPANY, TOPIC_DELETE_COMPANY, TOPIC_UPDATE_COMPANY};
use crate::domain::{Company, DomainResult, ResultExt};

/// Company operations exposed to the boundary adapter.
///
/// Arguments arrive typed from the adapter. Records are checked against the
/// field rules once more before they reach the store. `list` applies no
/// defaults or bounds of its own; the adapter is responsible for sane values.
#[async_trait]
pub trait CompanyUsecases: Send + Sync {
    /// Persist, then emit `create-company` with the new id.
    async fn create(&self, company: Company) -> DomainResult<Uuid>;
    async fn get(&self, id: Uuid) -> DomainResult<Company>;
    async fn list(&self, limit: u64, offset: u64) -> DomainResult<Vec<Company>>;
    /// Persist, then emit `delete-company` with the id.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
    /// Force `company.id = id`, persist, then emit `update-company` with the
    /// full record.
    async fn update(&self, id: Uuid, company: Company) -> DomainResult<()>;
}

pub struct CompanyUsecase<S: CompanyOperations, E: EventPublisher> {
    companies: Arc<S>,
    events: Arc<E>,
}

impl<S: CompanyOperations, E: EventPublisher> CompanyUsecase<S, E> {
    pub fn new(companies: Arc<S>, events: Arc<E>) -> Self {
        Self { companies, events }
    }

    async fn emit<T>(&self, topic: &'static str, payload: &T) -> DomainResult<()>
    where
        T: serde::Serialize + Sync + ?Sized,
    {
        match self.events.publish(topic, payload).await {
            Ok(()) => {
                metrics::counter!("company_events_total", "topic" => topic).increment(1);
                Ok(())
            }
            Err(e) => {
                warn!(topic, error = %e, "Event emission failed after the change was stored");
                Err(e)
            }
        }
    }
}

#[async_trait]
impl<S: CompanyOperations, E: EventPublisher> CompanyUsecases for CompanyUsecase<S, E> {
    async fn create(&self, company: Company) -> DomainResult<Uuid> {
        company.validate().context("company usecase: create")?;
        let company_type = company.company_type;
        let id = self
            .companies
            .create(company)
            .await
            .context("company usecase: create")?;
        info!(company_id = %id, %company_type, "Company created");

        self.emit(TOPIC_CREATE_COMPANY, &id)
            .await
            .context("company usecase: create")?;
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> DomainResult<Company> {
        self.companies.get(id).await.context("company usecase: get")
    }

    async fn list(&self, limit: u64, offset: u64) -> DomainResult<Vec<Company>> {
        self.companies
            .list(limit, offset)
            .await
            .context("company usecase: list")
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.companies
            .delete(id)
            .await
            .context("company usecase: delete")?;
        info!(company_id = %id, "Company deleted");

        self.emit(TOPIC_DELETE_COMPANY, &id)
            .await
            .context("company usecase: delete")
    }

    async fn update(&self, id: Uuid, mut company: Company) -> DomainResult<()> {
        company.id = id;
        company.validate().context("company usecase: update")?;
        self.companies
            .update(id, company.clone())
            .await
            .context("company usecase: update")?;
        info!(company_id = %id, "Company updated");

        self.emit(TOPIC_UPDATE_COMPANY, &company)
            .await
            .context("company usecase: update")
    }
}
