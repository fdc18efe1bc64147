mod common;

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use companies_service::infrastructure::crypto::jwt::create_token;
use companies_service::infrastructure::JwtConfig;
use common::{company_body, spawn_app, TEST_SECRET};

#[tokio::test]
async fn register_then_sign_in() {
    let app = spawn_app().await;
    let registered = app.register("alice", "alice@example.com", "wonderland").await;
    assert!(!registered.is_empty());

    let (status, body) = app
        .json(
            "POST",
            "/signin",
            None,
            &json!({"email": "alice@example.com", "password": "wonderland"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap();

    // The issued token opens the protected routes.
    let (status, _) = app
        .json("POST", "/companies", Some(token), &company_body("Alice Co"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = spawn_app().await;
    app.register("bob", "bob@example.com", "builder").await;

    let (status, body) = app
        .json(
            "POST",
            "/register",
            None,
            &json!({"username": "bobby", "email": "bob@example.com", "password": "other"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn bad_credentials_look_the_same() {
    let app = spawn_app().await;
    app.register("carol", "carol@example.com", "right-one").await;

    let (wrong_status, wrong_body) = app
        .json(
            "POST",
            "/signin",
            None,
            &json!({"email": "carol@example.com", "password": "wrong-one"}),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .json(
            "POST",
            "/signin",
            None,
            &json!({"email": "nobody@example.com", "password": "whatever"}),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["error"], unknown_body["error"]);
}

#[tokio::test]
async fn register_validates_input() {
    let app = spawn_app().await;

    for body in [
        json!({"username": "dave", "email": "not-an-email", "password": "pw"}),
        json!({"username": "dv", "email": "dave@example.com", "password": "pw"}),
        json!({"username": "dave", "email": "dave@example.com", "password": ""}),
    ] {
        let (status, _) = app.json("POST", "/register", None, &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {}", body);
    }
}

#[tokio::test]
async fn expired_and_foreign_tokens_are_refused() {
    let app = spawn_app().await;
    let issuer = app.config.security.issuer.clone();

    let expired = create_token(
        "erin@example.com",
        "erin",
        &JwtConfig::new(TEST_SECRET, 60, issuer.clone()).with_ttl(Duration::minutes(-5)),
    )
    .unwrap();
    let (status, body) = app
        .json("POST", "/companies", Some(&expired), &company_body("Late"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token has expired");

    let foreign = create_token(
        "erin@example.com",
        "erin",
        &JwtConfig::new("some-other-secret", 60, issuer),
    )
    .unwrap();
    let (status, body) = app
        .json("POST", "/companies", Some(&foreign), &company_body("Forged"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid authentication token");
}
