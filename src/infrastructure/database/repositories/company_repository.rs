use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::debug;
use uuid::Uuid;

use super::db_err;
use crate::domain::{Company, CompanyRepository, CompanyType, DomainError, DomainResult};
use crate::infrastructure::database::entities::company::{self, CompanyKind};

pub struct SeaOrmCompanyRepository {
    db: DatabaseConnection,
}

impl SeaOrmCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn kind_to_domain(kind: CompanyKind) -> CompanyType {
    match kind {
        CompanyKind::Corporations => CompanyType::Corporations,
        CompanyKind::NonProfit => CompanyType::NonProfit,
        CompanyKind::Cooperative => CompanyType::Cooperative,
        CompanyKind::SoleProprietorship => CompanyType::SoleProprietorship,
    }
}

fn domain_to_kind(company_type: CompanyType) -> CompanyKind {
    match company_type {
        CompanyType::Corporations => CompanyKind::Corporations,
        CompanyType::NonProfit => CompanyKind::NonProfit,
        CompanyType::Cooperative => CompanyKind::Cooperative,
        CompanyType::SoleProprietorship => CompanyKind::SoleProprietorship,
    }
}

fn model_to_domain(model: company::Model) -> DomainResult<Company> {
    let id = Uuid::parse_str(&model.id)
        .map_err(|e| DomainError::Store(format!("corrupt company id {}: {}", model.id, e)))?;

    Ok(Company {
        id,
        name: model.name,
        description: model.description,
        amount_of_employees: model.amount_of_employees,
        registered: model.registered,
        company_type: kind_to_domain(model.company_type),
    })
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn create(&self, company: Company) -> DomainResult<Uuid> {
        let id = Uuid::new_v4();
        debug!(company_id = %id, "Inserting company");

        let now = Utc::now();
        let model = company::ActiveModel {
            id: Set(id.to_string()),
            name: Set(company.name),
            description: Set(company.description),
            amount_of_employees: Set(company.amount_of_employees),
            registered: Set(company.registered),
            company_type: Set(domain_to_kind(company.company_type)),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model.insert(&self.db).await.map_err(db_err)?;

        Ok(id)
    }

    async fn get(&self, id: Uuid) -> DomainResult<Company> {
        let model = company::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Company", "id", id))?;

        model_to_domain(model)
    }

    async fn list(&self, limit: u64, offset: u64) -> DomainResult<Vec<Company>> {
        let models = company::Entity::find()
            .order_by_asc(company::Column::CreatedAt)
            .order_by_asc(company::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        models.into_iter().map(model_to_domain).collect()
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = company::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Company", "id", id));
        }
        Ok(())
    }

    async fn update(&self, id: Uuid, company: Company) -> DomainResult<()> {
        // Single conditional write, so a concurrent delete reads as NotFound.
        let changes = company::ActiveModel {
            name: Set(company.name),
            description: Set(company.description),
            amount_of_employees: Set(company.amount_of_employees),
            registered: Set(company.registered),
            company_type: Set(domain_to_kind(company.company_type)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        let result = company::Entity::update_many()
            .set(changes)
            .filter(company::Column::Id.eq(id.to_string()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Company", "id", id));
        }
        Ok(())
    }
}
