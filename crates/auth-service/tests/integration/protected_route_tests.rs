//! E2E tests for bearer authentication on GET /api/v1/users/me.
//!
//! Every rejection is a 401 with a `WWW-Authenticate` challenge. Expired and
//! forged tokens produce identical responses.

use auth_service::errors::INVALID_TOKEN_MESSAGE;
use auth_test_utils::{test_token_maker, TestAuthServer, TestTokenBuilder, TestUserBuilder};
use reqwest::StatusCode;

async fn get_me(
    server: &TestAuthServer,
    authorization: Option<&str>,
) -> Result<reqwest::Response, anyhow::Error> {
    let mut request = server
        .client()
        .get(format!("{}/api/v1/users/me", server.url()));
    if let Some(value) = authorization {
        request = request.header("authorization", value);
    }
    Ok(request.send().await?)
}

async fn assert_unauthorized(
    response: reqwest::Response,
    expected_message: &str,
) -> Result<(), anyhow::Error> {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(
        response.headers().contains_key("www-authenticate"),
        "401 responses carry a bearer challenge"
    );
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"].as_str(), Some("INVALID_TOKEN"));
    assert_eq!(body["error"]["message"].as_str(), Some(expected_message));
    Ok(())
}

#[tokio::test]
async fn test_me_with_valid_token_returns_profile() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let user = TestUserBuilder::new()
        .with_name("Alice Liddell")
        .with_username("alice");
    let token = server.register(&user).await?;

    let response = get_me(&server, Some(&format!("Bearer {}", token))).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(
        body,
        serde_json::json!({
            "name": "Alice Liddell",
            "email": "alice@example.com",
            "username": "alice",
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_me_without_header_unauthorized() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = get_me(&server, None).await?;

    assert_unauthorized(response, "missing authorization header").await
}

#[tokio::test]
async fn test_me_with_basic_scheme_unauthorized() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = server
        .register(&TestUserBuilder::new().with_username("alice"))
        .await?;

    let response = get_me(&server, Some(&format!("Basic {}", token))).await?;

    assert_unauthorized(response, "unsupported authorization type basic").await
}

#[tokio::test]
async fn test_me_with_token_but_no_scheme_unauthorized() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = server
        .register(&TestUserBuilder::new().with_username("alice"))
        .await?;

    let response = get_me(&server, Some(&token)).await?;

    assert_unauthorized(response, "invalid authorization header format").await
}

#[tokio::test]
async fn test_me_with_expired_token_unauthorized() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = TestTokenBuilder::new()
        .for_subject("anyone")
        .expired()
        .build(server.token_maker())?;

    let response = get_me(&server, Some(&format!("Bearer {}", token))).await?;

    assert_unauthorized(response, INVALID_TOKEN_MESSAGE).await
}

#[tokio::test]
async fn test_me_with_token_from_other_key_unauthorized() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let foreign = test_token_maker(99)?;
    let token = TestTokenBuilder::new().build(&foreign)?;

    let response = get_me(&server, Some(&format!("Bearer {}", token))).await?;

    assert_unauthorized(response, INVALID_TOKEN_MESSAGE).await
}

#[tokio::test]
async fn test_me_with_tampered_token_unauthorized() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = server
        .register(&TestUserBuilder::new().with_username("alice"))
        .await?;

    // Flip the last character of the body.
    let mut tampered: Vec<char> = token.chars().collect();
    if let Some(last) = tampered.last_mut() {
        *last = if *last == 'A' { 'B' } else { 'A' };
    }
    let tampered: String = tampered.into_iter().collect();

    let response = get_me(&server, Some(&format!("Bearer {}", tampered))).await?;

    assert_unauthorized(response, INVALID_TOKEN_MESSAGE).await
}

#[tokio::test]
async fn test_me_for_deleted_subject_not_found() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    // Valid token whose subject was never registered.
    let token = TestTokenBuilder::new()
        .for_subject("00000000-0000-0000-0000-000000000064")
        .build(server.token_maker())?;

    let response = get_me(&server, Some(&format!("Bearer {}", token))).await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}
