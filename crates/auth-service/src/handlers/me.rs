//! Current user handler.

use crate::errors::AuthError;
use crate::models::UserResponse;
use crate::routes::AppState;
use crate::services::user_service;
use crate::token::Payload;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;
use tracing::instrument;

/// Handler for GET /api/v1/users/me
///
/// Returns the profile of the user the access token was issued to. Requires
/// the auth middleware.
///
/// ```json
/// { "name": "Alice", "email": "alice@example.com", "username": "alice" }
/// ```
#[instrument(skip_all, name = "auth.handlers.me")]
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(payload): Extension<Payload>,
) -> Result<Json<UserResponse>, AuthError> {
    tracing::debug!(target: "auth.handlers.me", token_id = %payload.id(), "Loading current user");

    let profile = user_service::get_profile(state.store.as_ref(), &payload).await?;

    Ok(Json(profile))
}
