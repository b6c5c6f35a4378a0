//! Bearer authentication middleware for protected routes.
//!
//! Extracts the access token from the `Authorization` header, verifies it
//! with the configured [`TokenMaker`], and stores the resulting
//! [`Payload`](crate::token::Payload) in request extensions. Every rejection is a 401 and the downstream handler
//! never runs.

use crate::errors::AuthError;
use crate::observability::metrics::record_token_validation;
use crate::token::TokenMaker;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

/// Name of the header carrying the access token.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// The only accepted authorization scheme (matched case-insensitively).
pub const AUTHORIZATION_TYPE_BEARER: &str = "bearer";

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub token_maker: Arc<dyn TokenMaker>,
}

/// Reasons an `Authorization` header is rejected before the token is read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthHeaderError {
    #[error("missing authorization header")]
    Missing,

    #[error("invalid authorization header format")]
    InvalidFormat,

    #[error("unsupported authorization type {0}")]
    UnsupportedType(String),
}

impl From<AuthHeaderError> for AuthError {
    fn from(err: AuthHeaderError) -> Self {
        AuthError::InvalidToken(err.to_string())
    }
}

/// Extract the bearer token from request headers.
///
/// The header value must be exactly two non-empty fields separated by a
/// single space: `<scheme> <token>`.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthHeaderError> {
    let value = headers
        .get(AUTHORIZATION_HEADER)
        .ok_or(AuthHeaderError::Missing)?;

    if value.is_empty() {
        return Err(AuthHeaderError::Missing);
    }

    let value = value.to_str().map_err(|_| AuthHeaderError::InvalidFormat)?;

    let mut fields = value.split(' ');
    let (scheme, token) = match (fields.next(), fields.next(), fields.next()) {
        (Some(scheme), Some(token), None) if !scheme.is_empty() && !token.is_empty() => {
            (scheme, token)
        }
        _ => return Err(AuthHeaderError::InvalidFormat),
    };

    if !scheme.eq_ignore_ascii_case(AUTHORIZATION_TYPE_BEARER) {
        return Err(AuthHeaderError::UnsupportedType(scheme.to_lowercase()));
    }

    Ok(token)
}

/// Authentication middleware.
///
/// # Response
///
/// - 401 if the header is missing, malformed, uses another scheme, or the
///   token fails verification (expired and invalid tokens share one message)
/// - Otherwise continues with the [`Payload`](crate::token::Payload) in
///   request extensions, read by handlers through `Extension<Payload>`
#[instrument(skip_all, name = "auth.middleware.auth")]
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, AuthError> {
    let token = extract_bearer_token(req.headers()).inspect_err(|e| {
        tracing::debug!(target: "auth.middleware.auth", reason = %e, "Rejected authorization header");
    })?;

    let payload = match state.token_maker.verify_token(token) {
        Ok(payload) => {
            record_token_validation("success", None);
            payload
        }
        Err(e) => {
            tracing::debug!(target: "auth.middleware.auth", category = e.category(), "Token verification failed");
            record_token_validation("error", Some(e.category()));
            return Err(e.into());
        }
    };

    req.extensions_mut().insert(payload);

    Ok(next.run(req).await)
}
