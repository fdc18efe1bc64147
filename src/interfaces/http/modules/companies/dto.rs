//! Company DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Company, CompanyType};

/// Body of `POST /companies` and `PATCH /companies/{id}`.
///
/// PATCH replaces the whole record, so both take the same shape.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompanyRequest {
    #[validate(length(min = 1, max = 15, message = "name must be 1-15 characters"))]
    pub name: String,
    #[validate(length(max = 3000, message = "description must be at most 3000 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "amount_of_employees must be at least 1"))]
    pub amount_of_employees: i32,
    pub registered: bool,
    /// `Corporations`, `NonProfit`, `Cooperative` or `Sole Proprietorship`
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "Corporations")]
    pub company_type: CompanyType,
}

impl CompanyRequest {
    /// Domain record with a placeholder id; the store or the path decides
    /// the real one.
    pub fn into_company(self) -> Company {
        Company {
            id: Uuid::nil(),
            name: self.name,
            description: self.description,
            amount_of_employees: self.amount_of_employees,
            registered: self.registered,
            company_type: self.company_type,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub amount_of_employees: i32,
    pub registered: bool,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "Corporations")]
    pub company_type: CompanyType,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            description: company.description,
            amount_of_employees: company.amount_of_employees,
            registered: company.registered,
            company_type: company.company_type,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyIdResponse {
    pub id: Uuid,
}

/// Raw list query. Kept as strings so bad values fall back to defaults
/// instead of failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCompaniesQuery {
    /// Page size, default 20, at most 100
    pub limit: Option<String>,
    /// Rows to skip, default 0
    pub offset: Option<String>,
}
