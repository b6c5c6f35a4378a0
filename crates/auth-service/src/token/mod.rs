//! Access token issuance and verification.
//!
//! Callers depend on the [`TokenMaker`] trait and never on a concrete scheme.
//! [`SealedTokenMaker`] is the production implementation: it seals a JSON
//! [`Payload`] with ChaCha20-Poly1305 under a 32-byte symmetric key.
//!
//! Verification failures come in two kinds, [`TokenError::Expired`] and
//! [`TokenError::Invalid`]. They stay distinct for logs and metrics, and the
//! HTTP layer renders both as the same 401 response.

mod payload;
mod sealed;

pub use payload::Payload;
pub use sealed::{SealedTokenMaker, MAX_TOKEN_SIZE_BYTES, SYMMETRIC_KEY_SIZE, TOKEN_HEADER};

use chrono::Duration;
use thiserror::Error;

/// Token construction and verification failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Invalid key size: expected {expected} bytes, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    #[error("Token has expired")]
    Expired,

    #[error("Token is invalid")]
    Invalid,

    #[error("Token operation failed: {0}")]
    Internal(String),
}

impl TokenError {
    /// Bounded label for metrics and structured logs.
    pub fn category(&self) -> &'static str {
        match self {
            TokenError::InvalidKeySize { .. } => "configuration",
            TokenError::Expired => "expired",
            TokenError::Invalid => "invalid",
            TokenError::Internal(_) => "internal",
        }
    }
}

/// Issues and verifies access tokens.
///
/// Implementations hold only immutable key material, so a single instance is
/// shared across all requests as `Arc<dyn TokenMaker>`. Rotating the key means
/// building a new maker.
pub trait TokenMaker: Send + Sync {
    /// Create a token for `subject_id` that expires after `duration`.
    fn create_token(&self, subject_id: &str, duration: Duration) -> Result<String, TokenError>;

    /// Verify `token` and return its payload if it is authentic and unexpired.
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}
