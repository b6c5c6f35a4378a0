//! E2E tests for user registration and login.
//!
//! ## Test Naming
//!
//! Tests follow the convention: `test_<feature>_<scenario>_<expected_result>`

use auth_service::crypto::verify_password;
use auth_service::repositories::UserStore;
use auth_service::token::TokenMaker;
use auth_test_utils::{TestAuthServer, TestUserBuilder, TokenAssertions};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Registration Tests
// ============================================================================

/// A new user gets a bearer token that names them as subject.
#[tokio::test]
async fn test_register_happy_path() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestAuthServer::spawn().await?;
    let user = TestUserBuilder::new().with_username("alice");

    // Act
    let response = server
        .client()
        .post(format!("{}/api/v1/auth/register", server.url()))
        .json(&user.build())
        .send()
        .await?;

    // Assert
    assert_eq!(
        response.status(),
        StatusCode::OK,
        "Registration should succeed"
    );

    let body: serde_json::Value = response.json().await?;
    let lifetime = server.config().access_token_duration.num_seconds();
    assert_eq!(body["token_type"].as_str(), Some("Bearer"));
    assert_eq!(body["expires_in"].as_i64(), Some(lifetime));

    let token = body["access_token"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("access_token missing"))?
        .to_string();
    let stored = server
        .store()
        .get_user(user.username())
        .await?
        .ok_or_else(|| anyhow::anyhow!("user not stored"))?;

    assert_eq!(stored.name, user.name());
    assert_eq!(stored.email, user.email());
    assert_ne!(stored.password_hash, user.password(), "Passwords are hashed");
    assert!(verify_password(user.password(), &stored.password_hash)?);

    token
        .assert_sealed_format()
        .assert_for_subject(server.token_maker(), &stored.id.to_string());

    Ok(())
}

/// The same username cannot register twice.
#[tokio::test]
async fn test_register_duplicate_username_conflict() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    server
        .register(&TestUserBuilder::new().with_username("alice"))
        .await?;

    let response = server
        .client()
        .post(format!("{}/api/v1/auth/register", server.url()))
        .json(
            &TestUserBuilder::new()
                .with_username("alice")
                .with_email("alice2@example.com")
                .build(),
        )
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"].as_str(), Some("CONFLICT"));

    Ok(())
}

/// The same email cannot register twice.
#[tokio::test]
async fn test_register_duplicate_email_conflict() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    server
        .register(&TestUserBuilder::new().with_username("alice"))
        .await?;

    let response = server
        .client()
        .post(format!("{}/api/v1/auth/register", server.url()))
        .json(
            &TestUserBuilder::new()
                .with_username("bob")
                .with_email("alice@example.com")
                .build(),
        )
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    Ok(())
}

/// Missing fields are rejected before anything is stored.
#[tokio::test]
async fn test_register_missing_field_bad_request() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/api/v1/auth/register", server.url()))
        .json(&json!({
            "name": "Alice",
            "username": "alice",
            "password": "password123"
        }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(server.store().get_user("alice").await?.is_none());

    Ok(())
}

/// Blank fields are rejected with a message naming the field.
#[tokio::test]
async fn test_register_blank_field_bad_request() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/api/v1/auth/register", server.url()))
        .json(&TestUserBuilder::new().with_email("  ").build())
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["message"].as_str(), Some("email is required"));

    Ok(())
}

/// A body that is not JSON is a 400.
#[tokio::test]
async fn test_register_malformed_json_bad_request() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/api/v1/auth/register", server.url()))
        .header("content-type", "application/json")
        .body("{\"username\": ")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

// ============================================================================
// Login Tests
// ============================================================================

/// Login with the registered password returns a fresh token for the same user.
#[tokio::test]
async fn test_login_happy_path() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let user = TestUserBuilder::new().with_username("alice");
    let registration_token = server.register(&user).await?;

    let response = server
        .client()
        .post(format!("{}/api/v1/auth/login", server.url()))
        .json(&user.login_body())
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    let login_token = body["access_token"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("access_token missing"))?
        .to_string();

    assert_ne!(login_token, registration_token, "Each token is unique");

    let maker = server.token_maker();
    let from_registration = maker.verify_token(&registration_token)?;
    login_token.assert_for_subject(maker, from_registration.subject_id());

    Ok(())
}

/// Wrong password is 401.
#[tokio::test]
async fn test_login_wrong_password_unauthorized() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let user = TestUserBuilder::new().with_username("alice");
    server.register(&user).await?;

    let response = server
        .client()
        .post(format!("{}/api/v1/auth/login", server.url()))
        .json(&user.clone().with_password("wrong-password").login_body())
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"].as_str(), Some("INVALID_CREDENTIALS"));

    Ok(())
}

/// Unknown username is 404.
#[tokio::test]
async fn test_login_unknown_user_not_found() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/api/v1/auth/login", server.url()))
        .json(&TestUserBuilder::new().with_username("ghost").login_body())
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}
