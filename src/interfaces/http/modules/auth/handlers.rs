//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use super::dto::{RegisterRequest, SignInRequest, TokenResponse};
use crate::application::AuthUsecases;
use crate::domain::{CredentialService, User};
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth: Arc<dyn AuthUsecases>,
    pub credentials: Arc<dyn CredentialService>,
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<TokenResponse>),
        (status = 400, description = "Validation error or email already registered")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TokenResponse>>), ApiError> {
    let user = User::new(
        request.username,
        request.email,
        &request.password,
        state.credentials.as_ref(),
    )?;

    let token = state.auth.sign_up(user).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(TokenResponse { token })),
    ))
}

#[utoipa::path(
    post,
    path = "/signin",
    tag = "Authentication",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Successful sign in", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn sign_in(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<SignInRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    match state.auth.sign_in(&request.email, &request.password).await {
        Ok(token) => Ok(Json(ApiResponse::success(TokenResponse { token }))),
        // Unknown email and wrong password look the same from outside.
        Err(e) if e.is_not_found() || e.is_auth_failure() => {
            info!(email = %request.email, "Sign in rejected");
            Err(ApiError::unauthorized("Invalid credentials"))
        }
        Err(e) => Err(e.into()),
    }
}
