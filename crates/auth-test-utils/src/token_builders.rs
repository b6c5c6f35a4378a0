//! Builder patterns for test data construction
//!
//! Provides fluent APIs for creating test tokens and request bodies.

use auth_service::token::{TokenError, TokenMaker};
use chrono::Duration;
use serde_json::json;

/// Builder for creating sealed test tokens
///
/// # Example
/// ```rust,ignore
/// let token = TestTokenBuilder::new()
///     .for_subject("alice")
///     .expires_in(60)
///     .build(&maker)?;
/// ```
pub struct TestTokenBuilder {
    subject: String,
    duration: Duration,
}

impl TestTokenBuilder {
    /// Create a new token builder with defaults (one hour lifetime)
    pub fn new() -> Self {
        Self {
            subject: "test-subject".to_string(),
            duration: Duration::hours(1),
        }
    }

    /// Set the subject
    pub fn for_subject(mut self, subject: &str) -> Self {
        self.subject = subject.to_string();
        self
    }

    /// Set expiration in seconds from now (negative means already expired)
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.duration = Duration::seconds(seconds);
        self
    }

    /// Make a token that expired a minute ago
    pub fn expired(self) -> Self {
        self.expires_in(-60)
    }

    /// Seal the token with `maker`
    pub fn build(self, maker: &dyn TokenMaker) -> Result<String, TokenError> {
        maker.create_token(&self.subject, self.duration)
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for registration request bodies
///
/// # Example
/// ```rust,ignore
/// let body = TestUserBuilder::new().with_username("bob").build();
/// ```
#[derive(Debug, Clone)]
pub struct TestUserBuilder {
    name: String,
    username: String,
    email: String,
    password: String,
}

impl TestUserBuilder {
    pub fn new() -> Self {
        Self {
            name: "Test User".to_string(),
            username: "test-user".to_string(),
            email: "test-user@example.com".to_string(),
            password: "test-password-12345".to_string(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the username; the email follows it unless set explicitly later
    pub fn with_username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self.email = format!("{}@example.com", username);
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Body for POST /api/v1/auth/register
    pub fn build(&self) -> serde_json::Value {
        json!({
            "name": self.name,
            "username": self.username,
            "email": self.email,
            "password": self.password,
        })
    }

    /// Body for POST /api/v1/auth/login
    pub fn login_body(&self) -> serde_json::Value {
        json!({
            "username": self.username,
            "password": self.password,
        })
    }
}

impl Default for TestUserBuilder {
    fn default() -> Self {
        Self::new()
    }
}
