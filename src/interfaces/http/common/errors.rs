//! `DomainError` → HTTP status mapping, plus request-body rejections

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use super::ApiResponse;
use crate::domain::DomainError;
use validator::ValidationErrors;

/// Error half of every handler result.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}

pub fn status_for(err: &DomainError) -> StatusCode {
    match err.root() {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Authentication(_)
        | DomainError::TokenExpired
        | DomainError::TokenMalformed(_)
        | DomainError::TokenBadSignature => StatusCode::UNAUTHORIZED,
        DomainError::Hashing(_)
        | DomainError::Signing(_)
        | DomainError::Store(_)
        | DomainError::Emission(_)
        | DomainError::Context { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            // Full chain goes to the log, not to the client.
            error!(error = %err, "Request failed");
            Self::new(status, "Internal server error")
        } else {
            warn!(error = %err, status = status.as_u16(), "Request rejected");
            Self::new(status, err.root().to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid JSON: {}", rejection.body_text()))
    }
}

/// Failed field rules become one 400 listing `field: message` pairs,
/// sorted by field name.
impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();

        if messages.is_empty() {
            Self::bad_request("Validation failed")
        } else {
            Self::bad_request(messages.join("; "))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.message))).into_response()
    }
}
