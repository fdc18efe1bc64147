//! User domain entity

use crate::domain::ports::CredentialService;
use crate::domain::DomainResult;

/// User model
///
/// Only ever carries a password *hash*. The plaintext is hashed in
/// [`User::new`] and never stored on the struct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    /// Build a not-yet-persisted user, hashing `password` on the way in.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: &str,
        credentials: &dyn CredentialService,
    ) -> DomainResult<Self> {
        let password_hash = credentials.hash_password(password)?;
        Ok(Self {
            id: 0,
            username: username.into(),
            email: email.into(),
            password_hash,
        })
    }

    /// Check a plaintext password against the stored hash.
    pub fn check_password(
        &self,
        password: &str,
        credentials: &dyn CredentialService,
    ) -> DomainResult<bool> {
        credentials.verify_password(&self.password_hash, password)
    }
}
