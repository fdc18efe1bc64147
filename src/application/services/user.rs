//! User service: pass-through over the user store

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{DomainResult, ResultExt, User, UserRepository};

#[async_trait]
pub trait UserOperations: Send + Sync {
    async fn create_user(&self, user: User) -> DomainResult<User>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<User>;
}

pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: UserRepository> UserOperations for UserService<R> {
    async fn create_user(&self, user: User) -> DomainResult<User> {
        self.repo.create(user).await.context("user service: create")
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<User> {
        self.repo
            .get_by_email(email)
            .await
            .context("user service: get by email")
    }
}
