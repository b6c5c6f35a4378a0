use crate::errors::AuthError;
use chrono::{DateTime, Utc};
use common::secret::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// User model (maps to users table)
#[derive(Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &"[REDACTED]")
            .field("name", &self.name)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Fields for inserting a new user.
#[derive(Clone)]
pub struct CreateUserParams {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// POST /api/v1/auth/register body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

impl RegisterRequest {
    /// All fields are required and must be non-blank.
    pub fn validate(&self) -> Result<(), AuthError> {
        require_field("name", &self.name)?;
        require_field("username", &self.username)?;
        require_field("email", &self.email)?;
        require_field("password", self.password.expose_secret())
    }
}

/// POST /api/v1/auth/login body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        require_field("username", &self.username)?;
        require_field("password", self.password.expose_secret())
    }
}

fn require_field(field: &str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

/// Access token issued by register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Public profile returned by GET /api/v1/users/me
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub name: String,
    pub email: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
            username: user.username,
        }
    }
}
