//! Company entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Company type as stored in the `company_type` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum CompanyKind {
    #[sea_orm(string_value = "Corporations")]
    Corporations,
    #[sea_orm(string_value = "NonProfit")]
    NonProfit,
    #[sea_orm(string_value = "Cooperative")]
    Cooperative,
    #[sea_orm(string_value = "Sole Proprietorship")]
    SoleProprietorship,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub amount_of_employees: i32,
    pub registered: bool,
    pub company_type: CompanyKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
