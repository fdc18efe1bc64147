//! bcrypt + HS256 JWT implementation of the credential primitive

use jsonwebtoken::errors::ErrorKind;
use tracing::debug;

use super::jwt::{self, JwtConfig};
use super::password;
use crate::domain::{CredentialService, DomainError, DomainResult, TokenClaims};

pub struct JwtCredentialService {
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl JwtCredentialService {
    pub fn new(jwt: JwtConfig, bcrypt_cost: u32) -> Self {
        Self { jwt, bcrypt_cost }
    }
}

fn token_error(e: jsonwebtoken::errors::Error) -> DomainError {
    match e.kind() {
        ErrorKind::InvalidSignature => DomainError::TokenBadSignature,
        ErrorKind::ExpiredSignature => DomainError::TokenExpired,
        _ => DomainError::TokenMalformed(e.to_string()),
    }
}

impl CredentialService for JwtCredentialService {
    fn hash_password(&self, password: &str) -> DomainResult<String> {
        password::hash_password(password, self.bcrypt_cost)
            .map_err(|e| DomainError::Hashing(e.to_string()))
    }

    fn verify_password(&self, hash: &str, password: &str) -> DomainResult<bool> {
        password::verify_password(password, hash).map_err(|e| DomainError::Hashing(e.to_string()))
    }

    fn generate_token(&self, email: &str, username: &str) -> DomainResult<String> {
        if self.jwt.secret.is_empty() {
            return Err(DomainError::Signing("signing key is empty".into()));
        }
        jwt::create_token(email, username, &self.jwt)
            .map_err(|e| DomainError::Signing(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> DomainResult<TokenClaims> {
        let claims = jwt::verify_token(token, &self.jwt).map_err(|e| {
            debug!(error = %e, "Token rejected");
            token_error(e)
        })?;

        if claims.is_expired() {
            return Err(DomainError::TokenExpired);
        }
        Ok(claims)
    }
}
