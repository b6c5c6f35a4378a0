//! Fault injection tests for user store failures
//!
//! Validates that the service handles an unavailable store gracefully:
//! - Register, login and profile lookups return 500
//! - Liveness is unaffected
//! - Error bodies don't leak store details

use auth_service::repositories::InMemoryUserStore;
use auth_test_utils::{TestAuthServer, TestTokenBuilder, TestUserBuilder};
use reqwest::StatusCode;
use std::sync::Arc;

async fn spawn_failing() -> Result<TestAuthServer, anyhow::Error> {
    TestAuthServer::spawn_with_store(Arc::new(InMemoryUserStore::failing())).await
}

#[tokio::test]
async fn test_register_returns_500_when_store_unavailable() -> Result<(), anyhow::Error> {
    let server = spawn_failing().await?;

    let response = server
        .client()
        .post(format!("{}/api/v1/auth/register", server.url()))
        .json(&TestUserBuilder::new().build())
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"].as_str(), Some("DATABASE_ERROR"));
    assert!(
        !body.to_string().contains("In-memory"),
        "Store details must not reach clients"
    );

    Ok(())
}

#[tokio::test]
async fn test_login_returns_500_when_store_unavailable() -> Result<(), anyhow::Error> {
    let server = spawn_failing().await?;

    let response = server
        .client()
        .post(format!("{}/api/v1/auth/login", server.url()))
        .json(&TestUserBuilder::new().login_body())
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}

#[tokio::test]
async fn test_me_returns_500_when_store_unavailable() -> Result<(), anyhow::Error> {
    let server = spawn_failing().await?;
    let token = TestTokenBuilder::new()
        .for_subject("00000000-0000-0000-0000-000000000001")
        .build(server.token_maker())?;

    let response = server
        .client()
        .get(format!("{}/api/v1/users/me", server.url()))
        .bearer_auth(token)
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}

#[tokio::test]
async fn test_health_ok_when_store_unavailable() -> Result<(), anyhow::Error> {
    let server = spawn_failing().await?;

    let response = server
        .client()
        .get(format!("{}/health", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}
