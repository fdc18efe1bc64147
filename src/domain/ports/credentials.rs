//! Credential primitive: password hashing and signed tokens

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::DomainResult;

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub email: String,
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Hashes/verifies passwords and issues/validates signed, time-limited tokens.
pub trait CredentialService: Send + Sync {
    /// One-way hash with a fresh random salt. Fails with `Hashing`.
    fn hash_password(&self, password: &str) -> DomainResult<String>;

    /// `Ok(false)` on mismatch; `Hashing` only if `hash` itself is unusable.
    fn verify_password(&self, hash: &str, password: &str) -> DomainResult<bool>;

    /// Token bound to `email`/`username`, expiring after the configured TTL.
    /// Fails with `Signing` when the key is unusable.
    fn generate_token(&self, email: &str, username: &str) -> DomainResult<String>;

    /// `TokenBadSignature`, `TokenExpired` or `TokenMalformed` on rejection.
    ///
    /// Expiry is re-checked against the clock after decoding, so a token with
    /// a valid signature and a past `exp` is always `TokenExpired`.
    fn validate_token(&self, token: &str) -> DomainResult<TokenClaims>;
}
