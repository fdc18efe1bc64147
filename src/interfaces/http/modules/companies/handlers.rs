//! Company API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::info;
use uuid::Uuid;

use super::dto::{CompanyIdResponse, CompanyRequest, CompanyResponse, ListCompaniesQuery};
use crate::application::CompanyUsecases;
use crate::interfaces::http::common::{ApiError, ApiResponse, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::validate_pagination;

/// Company handler state
#[derive(Clone)]
pub struct CompanyState {
    pub companies: Arc<dyn CompanyUsecases>,
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("invalid company id '{}'", raw)))
}

#[utoipa::path(
    get,
    path = "/companies",
    tag = "Companies",
    params(ListCompaniesQuery),
    responses(
        (status = 200, description = "Page of companies", body = ApiResponse<Vec<CompanyResponse>>)
    )
)]
pub async fn list_companies(
    State(state): State<CompanyState>,
    Query(query): Query<ListCompaniesQuery>,
) -> Result<Json<ApiResponse<Vec<CompanyResponse>>>, ApiError> {
    let (limit, offset) = validate_pagination(query.limit.as_deref(), query.offset.as_deref());

    let companies = state.companies.list(limit, offset).await?;
    let items = companies.into_iter().map(CompanyResponse::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    get,
    path = "/companies/{id}",
    tag = "Companies",
    params(("id" = String, Path, description = "Company UUID")),
    responses(
        (status = 200, description = "Company", body = ApiResponse<CompanyResponse>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No such company")
    )
)]
pub async fn get_company(
    State(state): State<CompanyState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CompanyResponse>>, ApiError> {
    let id = parse_id(&id)?;
    let company = state.companies.get(id).await?;
    Ok(Json(ApiResponse::success(company.into())))
}

#[utoipa::path(
    post,
    path = "/companies",
    tag = "Companies",
    request_body = CompanyRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Company created", body = ApiResponse<CompanyIdResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_company(
    State(state): State<CompanyState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CompanyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CompanyIdResponse>>), ApiError> {
    let id = state.companies.create(request.into_company()).await?;
    info!(company_id = %id, by = %caller.email, "Create request served");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CompanyIdResponse { id })),
    ))
}

#[utoipa::path(
    patch,
    path = "/companies/{id}",
    tag = "Companies",
    params(("id" = String, Path, description = "Company UUID")),
    request_body = CompanyRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Company replaced", body = ApiResponse<CompanyIdResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such company")
    )
)]
pub async fn update_company(
    State(state): State<CompanyState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<CompanyRequest>,
) -> Result<Json<ApiResponse<CompanyIdResponse>>, ApiError> {
    let id = parse_id(&id)?;
    state.companies.update(id, request.into_company()).await?;
    info!(company_id = %id, by = %caller.email, "Update request served");
    Ok(Json(ApiResponse::success(CompanyIdResponse { id })))
}

#[utoipa::path(
    delete,
    path = "/companies/{id}",
    tag = "Companies",
    params(("id" = String, Path, description = "Company UUID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Company deleted", body = ApiResponse<EmptyData>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such company")
    )
)]
pub async fn delete_company(
    State(state): State<CompanyState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    let id = parse_id(&id)?;
    state.companies.delete(id).await?;
    info!(company_id = %id, by = %caller.email, "Delete request served");
    Ok(Json(ApiResponse::success(EmptyData {})))
}
