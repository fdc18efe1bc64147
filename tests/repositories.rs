//! SeaORM store behaviour against an in-memory SQLite database

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use companies_service::domain::{
    Company, CompanyRepository, CompanyType, DomainError, User, UserRepository,
};
use companies_service::infrastructure::{
    init_database, run_migrations, DatabaseConfig, SeaOrmCompanyRepository, SeaOrmUserRepository,
};

async fn db() -> DatabaseConnection {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&db).await.unwrap();
    db
}

fn company(name: &str) -> Company {
    Company {
        id: Uuid::nil(),
        name: name.into(),
        description: Some("widgets".into()),
        amount_of_employees: 7,
        registered: true,
        company_type: CompanyType::Cooperative,
    }
}

fn user(email: &str) -> User {
    User {
        id: 0,
        username: "user".into(),
        email: email.into(),
        password_hash: "$2b$04$placeholderplaceholderplaceholderplaceholderpla".into(),
    }
}

#[tokio::test]
async fn company_store_assigns_fresh_ids() {
    let repo = SeaOrmCompanyRepository::new(db().await);

    let a = repo.create(company("a")).await.unwrap();
    let b = repo.create(company("b")).await.unwrap();
    assert_ne!(a, b);
    assert!(!a.is_nil());

    let stored = repo.get(a).await.unwrap();
    assert_eq!(stored.id, a);
    assert_eq!(stored.name, "a");
    assert_eq!(stored.company_type, CompanyType::Cooperative);
}

#[tokio::test]
async fn company_store_update_and_delete() {
    let repo = SeaOrmCompanyRepository::new(db().await);
    let id = repo.create(company("before")).await.unwrap();

    let mut changed = company("after");
    changed.company_type = CompanyType::SoleProprietorship;
    changed.description = None;
    repo.update(id, changed).await.unwrap();

    let stored = repo.get(id).await.unwrap();
    assert_eq!(stored.name, "after");
    assert_eq!(stored.description, None);
    assert_eq!(stored.company_type, CompanyType::SoleProprietorship);

    repo.delete(id).await.unwrap();
    assert!(matches!(repo.get(id).await, Err(DomainError::NotFound { .. })));
    assert!(matches!(repo.delete(id).await, Err(DomainError::NotFound { .. })));
    assert!(matches!(
        repo.update(id, company("ghost")).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn company_store_pages() {
    let repo = SeaOrmCompanyRepository::new(db().await);
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(repo.create(company(&format!("c{}", i))).await.unwrap());
    }

    let page = repo.list(2, 1).await.unwrap();
    assert_eq!(page.iter().map(|c| c.id).collect::<Vec<_>>(), ids[1..3]);
    assert!(repo.list(10, 5).await.unwrap().is_empty());
    assert!(repo.list(0, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn user_store_enforces_unique_email() {
    let repo = SeaOrmUserRepository::new(db().await);

    let created = repo.create(user("frank@example.com")).await.unwrap();
    assert!(created.id > 0);

    let err = repo.create(user("frank@example.com")).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    let found = repo.get_by_email("frank@example.com").await.unwrap();
    assert_eq!(found.id, created.id);
    assert!(matches!(
        repo.get_by_email("ghost@example.com").await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn company_store_update_is_a_single_conditional_write() {
    let repo = SeaOrmCompanyRepository::new(db().await);
    let id = repo.create(company("same")).await.unwrap();

    // Rewriting identical values still counts as a hit.
    repo.update(id, company("same")).await.unwrap();
    assert_eq!(repo.get(id).await.unwrap().name, "same");

    // A row removed before the write is reported as missing, not as a store failure.
    repo.delete(id).await.unwrap();
    let err = repo.update(id, company("late")).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert!(repo.list(10, 0).await.unwrap().is_empty());
}
