//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::TokenClaims;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token lifetime
    pub ttl: Duration,
    /// Issuer claim
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, ttl_minutes: i64, issuer: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::minutes(ttl_minutes),
            issuer: issuer.into(),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Build claims for a user, issued now.
pub fn new_claims(email: &str, username: &str, config: &JwtConfig) -> TokenClaims {
    let now = Utc::now();
    let exp = now + config.ttl;

    TokenClaims {
        email: email.to_string(),
        username: username.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
        iss: config.issuer.clone(),
    }
}

/// Create an HS256 token for a user
pub fn create_token(
    email: &str,
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = new_claims(email, username, config);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a token. No clock leeway is allowed.
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.leeway = 0;
    validation.set_issuer(&[&config.issuer]);
    validation.set_required_spec_claims(&["exp", "iss"]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    fn config() -> JwtConfig {
        JwtConfig::new("secret", 60, "companies-service")
    }

    #[test]
    fn test_create_and_verify() {
        let token = create_token("a@x.io", "alice", &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();

        assert_eq!(claims.email, "a@x.io");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iss, "companies-service");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let token = create_token("a@x.io", "alice", &config()).unwrap();
        let other = JwtConfig::new("other", 60, "companies-service");

        let err = verify_token(&token, &other).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidSignature));
    }

    #[test]
    fn test_other_issuer_is_rejected() {
        let token = create_token("a@x.io", "alice", &config()).unwrap();
        let other = JwtConfig::new("secret", 60, "someone-else");

        let err = verify_token(&token, &other).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidIssuer));
    }

    #[test]
    fn test_past_expiry_is_rejected() {
        let expired = config().with_ttl(Duration::seconds(-10));
        let token = create_token("a@x.io", "alice", &expired).unwrap();

        let err = verify_token(&token, &config()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }
}
