//! Bearer-token authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::application::AuthUsecases;
use crate::domain::{DomainError, TokenClaims};
use crate::interfaces::http::common::ApiError;

/// Why a protected request was turned away
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
}

/// State for [`auth_middleware`]
#[derive(Clone)]
pub struct AuthState {
    pub auth: Arc<dyn AuthUsecases>,
}

/// Caller identity, inserted into request extensions once the token checks out.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub email: String,
    pub username: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            email: claims.email,
            username: claims.username,
        }
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Reject the request with 401 before the handler runs unless it carries a
/// valid `Authorization: Bearer <token>` header.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match auth_state.auth.validate_token(token) {
        Ok(claims) => {
            let user = AuthenticatedUser::from_claims(claims);
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(DomainError::TokenExpired) => auth_error_response(AuthError::ExpiredToken),
        Err(e) => {
            debug!(error = %e, "Bearer token rejected");
            auth_error_response(AuthError::InvalidToken)
        }
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let message = match error {
        AuthError::MissingToken => "Missing authentication token",
        AuthError::InvalidToken => "Invalid authentication token",
        AuthError::ExpiredToken => "Token has expired",
    };
    ApiError::unauthorized(message).into_response()
}
