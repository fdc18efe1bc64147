//! Authentication usecase: sign-up, sign-in and token validation

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::application::services::UserOperations;
use crate::domain::{CredentialService, DomainError, DomainResult, ResultExt, TokenClaims, User};

#[async_trait]
pub trait AuthUsecases: Send + Sync {
    /// Claims of a valid token, or the credential primitive's rejection.
    fn validate_token(&self, token: &str) -> DomainResult<TokenClaims>;
    /// Persist a user whose password is already hashed and return a token.
    async fn sign_up(&self, user: User) -> DomainResult<String>;
    /// Check credentials and return a token.
    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<String>;
}

pub struct AuthUsecase<U: UserOperations> {
    users: Arc<U>,
    credentials: Arc<dyn CredentialService>,
}

impl<U: UserOperations> AuthUsecase<U> {
    pub fn new(users: Arc<U>, credentials: Arc<dyn CredentialService>) -> Self {
        Self { users, credentials }
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialService> {
        &self.credentials
    }
}

#[async_trait]
impl<U: UserOperations> AuthUsecases for AuthUsecase<U> {
    fn validate_token(&self, token: &str) -> DomainResult<TokenClaims> {
        self.credentials.validate_token(token)
    }

    async fn sign_up(&self, user: User) -> DomainResult<String> {
        let created = self
            .users
            .create_user(user)
            .await
            .context("auth usecase: sign up")?;
        info!(user_id = created.id, email = %created.email, "User registered");

        self.credentials
            .generate_token(&created.email, &created.username)
            .context("auth usecase: sign up")
    }

    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<String> {
        let user = self
            .users
            .get_user_by_email(email)
            .await
            .context("auth usecase: sign in")?;

        let matches = user
            .check_password(password, self.credentials.as_ref())
            .context("auth usecase: sign in")?;
        if !matches {
            debug!(email, "Password mismatch");
            return Err(DomainError::Authentication("invalid password".into())
                .context("auth usecase: sign in"));
        }

        info!(user_id = user.id, "User signed in");
        self.credentials
            .generate_token(&user.email, &user.username)
            .context("auth usecase: sign in")
    }
}
