//! User registration, login and profile lookup.
//!
//! Both register and login end by issuing an access token whose subject is
//! the user's id.

use crate::config::Config;
use crate::crypto;
use crate::errors::AuthError;
use crate::models::{CreateUserParams, LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::observability::metrics::record_token_issuance;
use crate::repositories::UserStore;
use crate::token::{Payload, TokenMaker};
use chrono::Duration;
use common::secret::ExposeSecret;
use tracing::instrument;
use uuid::Uuid;

/// Token type reported to clients.
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Create an access token for `subject_id` and wrap it for the client.
pub fn issue_access_token(
    token_maker: &dyn TokenMaker,
    subject_id: &str,
    duration: Duration,
) -> Result<TokenResponse, AuthError> {
    let expires_in = u64::try_from(duration.num_seconds()).map_err(|_| {
        record_token_issuance("error");
        AuthError::Internal
    })?;

    let access_token = token_maker
        .create_token(subject_id, duration)
        .inspect_err(|e| {
            tracing::error!(target: "auth.service.user", error = %e, "Failed to create access token");
            record_token_issuance("error");
        })?;
    record_token_issuance("success");

    Ok(TokenResponse {
        access_token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in,
    })
}

/// Register a new user and log them in.
///
/// # Steps
///
/// 1. Validate required fields
/// 2. Hash password (bcrypt, configured cost)
/// 3. Insert user (duplicate username/email is a conflict)
/// 4. Issue access token
#[instrument(skip_all)]
pub async fn register_user(
    store: &dyn UserStore,
    token_maker: &dyn TokenMaker,
    config: &Config,
    request: RegisterRequest,
) -> Result<TokenResponse, AuthError> {
    request.validate()?;

    let password_hash =
        crypto::hash_password(request.password.expose_secret(), config.bcrypt_cost)?;

    let user = store
        .create_user(CreateUserParams {
            id: Uuid::new_v4(),
            username: request.username,
            email: request.email,
            name: request.name,
            password_hash,
        })
        .await?;

    tracing::info!(target: "auth.service.user", user_id = %user.id, "User registered");

    issue_access_token(
        token_maker,
        &user.id.to_string(),
        config.access_token_duration,
    )
}

/// Authenticate a user by username and password.
///
/// Unknown usernames are `NotFound`; a wrong password is
/// `InvalidCredentials`.
#[instrument(skip_all)]
pub async fn login_user(
    store: &dyn UserStore,
    token_maker: &dyn TokenMaker,
    config: &Config,
    request: LoginRequest,
) -> Result<TokenResponse, AuthError> {
    request.validate()?;

    let user = store
        .get_user(&request.username)
        .await?
        .ok_or_else(|| AuthError::NotFound("User not found".to_string()))?;

    if !crypto::verify_password(request.password.expose_secret(), &user.password_hash)? {
        tracing::debug!(target: "auth.service.user", user_id = %user.id, "Password mismatch");
        return Err(AuthError::InvalidCredentials);
    }

    issue_access_token(
        token_maker,
        &user.id.to_string(),
        config.access_token_duration,
    )
}

/// Load the profile of the user a verified token was issued to.
#[instrument(skip_all)]
pub async fn get_profile(
    store: &dyn UserStore,
    payload: &Payload,
) -> Result<UserResponse, AuthError> {
    // Subjects are always user ids minted by this service.
    let user_id = Uuid::parse_str(payload.subject_id()).map_err(|_| {
        tracing::warn!(target: "auth.service.user", "Token subject is not a user id");
        AuthError::NotFound("User not found".to_string())
    })?;

    let user = store
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| AuthError::NotFound("User not found".to_string()))?;

    Ok(UserResponse::from(user))
}
