//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use companies_service::config::AppConfig;
use companies_service::server::build_app;
use companies_service::{create_event_bus, init_database, run_migrations, DatabaseConfig, SharedEventBus};

pub const TEST_SECRET: &str = "integration-secret";

pub struct TestApp {
    pub router: Router,
    pub events: SharedEventBus,
    pub config: AppConfig,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.url = "sqlite::memory:".into();
    config.security.jwt_secret = TEST_SECRET.into();
    config.security.bcrypt_cost = 4;
    config.metrics.enabled = false;
    config
}

/// Fresh in-memory database, migrated, behind the full router.
pub async fn spawn_app() -> TestApp {
    let config = test_config();
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&db).await.unwrap();

    let events = create_event_bus(64);
    let router = build_app(&config, Some(db), events.clone(), None);
    TestApp {
        router,
        events,
        config,
    }
}

/// Same router on the in-process stores, no database at all.
pub fn spawn_memory_app() -> TestApp {
    let config = test_config();
    let events = create_event_bus(64);
    let router = build_app(&config, None, events.clone(), None);
    TestApp {
        router,
        events,
        config,
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let mut svc = self.router.clone().into_service();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::delete(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Register a user and return its token.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> String {
        let (status, body) = self
            .json(
                "POST",
                "/register",
                None,
                &json!({"username": username, "email": email, "password": password}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    pub async fn token(&self) -> String {
        self.register("tester", "tester@example.com", "s3cret-pass")
            .await
    }

    /// Create a company and return its id.
    pub async fn create_company(&self, token: &str, name: &str) -> String {
        let (status, body) = self
            .json("POST", "/companies", Some(token), &company_body(name))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

pub fn company_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "makes things",
        "amount_of_employees": 12,
        "registered": true,
        "type": "Corporations"
    })
}
