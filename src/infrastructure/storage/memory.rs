//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{Company, CompanyRepository, DomainError, DomainResult, User, UserRepository};

/// In-memory company store. Rows keep insertion order for `list`.
pub struct InMemoryCompanyRepository {
    companies: DashMap<Uuid, (u64, Company)>,
    sequence: AtomicU64,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self {
            companies: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

impl Default for InMemoryCompanyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn create(&self, mut company: Company) -> DomainResult<Uuid> {
        let id = Uuid::new_v4();
        company.id = id;
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        self.companies.insert(id, (seq, company));
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> DomainResult<Company> {
        self.companies
            .get(&id)
            .map(|entry| entry.value().1.clone())
            .ok_or_else(|| DomainError::not_found("Company", "id", id))
    }

    async fn list(&self, limit: u64, offset: u64) -> DomainResult<Vec<Company>> {
        let mut rows: Vec<(u64, Company)> = self
            .companies
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);

        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|(_, company)| company)
            .collect())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.companies
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Company", "id", id))
    }

    async fn update(&self, id: Uuid, mut company: Company) -> DomainResult<()> {
        let mut entry = self
            .companies
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Company", "id", id))?;
        company.id = id;
        entry.value_mut().1 = company;
        Ok(())
    }
}

/// In-memory user store keyed by email.
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
    user_counter: AtomicI32,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            user_counter: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, mut user: User) -> DomainResult<User> {
        use dashmap::mapref::entry::Entry;

        match self.users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "user with email {} already exists",
                user.email
            ))),
            Entry::Vacant(slot) => {
                user.id = self.user_counter.fetch_add(1, Ordering::SeqCst);
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn get_by_email(&self, email: &str) -> DomainResult<User> {
        self.users
            .get(email)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DomainError::not_found("User", "email", email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CompanyType;

    fn company(name: &str) -> Company {
        Company {
            id: Uuid::nil(),
            name: name.into(),
            description: None,
            amount_of_employees: 1,
            registered: false,
            company_type: CompanyType::Corporations,
        }
    }

    fn user(email: &str) -> User {
        User {
            id: 0,
            username: "alice".into(),
            email: email.into(),
            password_hash: "hash".into(),
        }
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = InMemoryCompanyRepository::new();
        for name in ["a", "b", "c", "d"] {
            repo.create(company(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list(2, 1)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let repo = InMemoryCompanyRepository::new();

        assert!(repo.update(Uuid::new_v4(), company("x")).await.unwrap_err().is_not_found());
        assert!(repo.delete(Uuid::new_v4()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_user_ids_are_assigned_and_emails_unique() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(user("a@x.io")).await.unwrap();
        let second = repo.create(user("b@x.io")).await.unwrap();
        assert_ne!(first.id, second.id);

        let err = repo.create(user("a@x.io")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.get_by_email("b@x.io").await.unwrap(), second);
    }
}
