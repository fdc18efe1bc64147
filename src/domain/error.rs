//! Domain errors
//!
//! Every layer wraps the error it received with the name of the operation
//! that failed ([`DomainError::context`]) instead of swallowing it. The
//! boundary adapter inspects [`DomainError::root`] to pick a status code.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is malformed: {0}")]
    TokenMalformed(String),

    #[error("Token signature is invalid")]
    TokenBadSignature,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Event emission failed: {0}")]
    Emission(String),

    #[error("{operation}: {source}")]
    Context {
        operation: &'static str,
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    /// Wrap this error with the name of the operation that produced it.
    pub fn context(self, operation: &'static str) -> Self {
        Self::Context {
            operation,
            source: Box::new(self),
        }
    }

    /// The innermost error, with all operation context peeled off.
    pub fn root(&self) -> &DomainError {
        let mut current = self;
        while let DomainError::Context { source, .. } = current {
            current = source;
        }
        current
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), DomainError::NotFound { .. })
    }

    /// Errors that mean "the caller is not who they claim to be".
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self.root(),
            DomainError::Authentication(_)
                | DomainError::TokenExpired
                | DomainError::TokenMalformed(_)
                | DomainError::TokenBadSignature
        )
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Attach operation context to the error side of a [`DomainResult`].
pub trait ResultExt<T> {
    fn context(self, operation: &'static str) -> DomainResult<T>;
}

impl<T> ResultExt<T> for DomainResult<T> {
    fn context(self, operation: &'static str) -> DomainResult<T> {
        self.map_err(|e| e.context(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_peels_nested_context() {
        let err = DomainError::not_found("Company", "id", "42")
            .context("company service: get")
            .context("company usecase: get");

        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "company usecase: get: company service: get: Not found: Company with id=42"
        );
    }

    #[test]
    fn token_errors_are_auth_failures() {
        assert!(DomainError::TokenExpired.context("validate").is_auth_failure());
        assert!(DomainError::TokenBadSignature.is_auth_failure());
        assert!(!DomainError::Store("boom".into()).is_auth_failure());
    }

    #[test]
    fn result_ext_wraps_only_errors() {
        let ok: DomainResult<u8> = Ok(1);
        assert_eq!(ok.context("noop").unwrap(), 1);

        let err: DomainResult<u8> = Err(DomainError::Conflict("email".into()));
        let err = err.context("user store: create").unwrap_err();
        assert!(matches!(err.root(), DomainError::Conflict(_)));
    }
}
