//! Registration and login handlers.

use crate::errors::AuthError;
use crate::models::{LoginRequest, RegisterRequest, TokenResponse};
use crate::routes::AppState;
use crate::services::user_service;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

/// Turn a body extraction failure into a 400 with the parser's message.
fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AuthError> {
    body.map(|Json(inner)| inner).map_err(|rejection| {
        tracing::debug!(target: "auth.handlers.auth", error = %rejection, "Rejected request body");
        AuthError::BadRequest(rejection.body_text())
    })
}

/// Handle user registration
///
/// POST /api/v1/auth/register
///
/// Returns an access token for the new account.
#[instrument(skip_all, name = "auth.handlers.register")]
pub async fn handle_register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let request = parse_body(body)?;

    let token = user_service::register_user(
        state.store.as_ref(),
        state.token_maker.as_ref(),
        &state.config,
        request,
    )
    .await?;

    Ok(Json(token))
}

/// Handle user login
///
/// POST /api/v1/auth/login
#[instrument(skip_all, name = "auth.handlers.login")]
pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let request = parse_body(body)?;

    let token = user_service::login_user(
        state.store.as_ref(),
        state.token_maker.as_ref(),
        &state.config,
        request,
    )
    .await?;

    Ok(Json(token))
}
