//! Claims carried inside every access token.

use super::TokenError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Verified claims of an access token.
///
/// A payload is built once by [`TokenMaker::create_token`](super::TokenMaker::create_token)
/// and reconstructed by [`TokenMaker::verify_token`](super::TokenMaker::verify_token).
/// Fields are private so a payload handed to a request handler cannot be
/// altered after verification.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    id: Uuid,
    subject_id: String,
    issued_at: DateTime<Utc>,
    expired_at: DateTime<Utc>,
}

impl Payload {
    /// Build a payload for `subject_id` issued now and expiring after `duration`.
    ///
    /// A zero or negative `duration` yields a payload that is already expired.
    pub fn new(subject_id: &str, duration: Duration) -> Result<Self, TokenError> {
        Self::new_at(subject_id, duration, Utc::now())
    }

    /// Build a payload with an explicit issue time.
    pub fn new_at(
        subject_id: &str,
        duration: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, TokenError> {
        let expired_at = issued_at.checked_add_signed(duration).ok_or_else(|| {
            TokenError::Internal("Token lifetime overflows the timestamp range".to_string())
        })?;

        Ok(Self {
            id: Uuid::new_v4(),
            subject_id: subject_id.to_string(),
            issued_at,
            expired_at,
        })
    }

    /// Unique token identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Identifier of the authenticated principal.
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expired_at(&self) -> DateTime<Utc> {
        self.expired_at
    }

    /// Check the payload against the current clock.
    pub fn valid(&self) -> Result<(), TokenError> {
        self.valid_at(Utc::now())
    }

    /// Check the payload against `now`. The expiry instant itself is still valid.
    pub fn valid_at(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        if now > self.expired_at {
            return Err(TokenError::Expired);
        }
        Ok(())
    }
}

/// Redacts the subject and token id, both of which identify a user.
impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("id", &"[REDACTED]")
            .field("subject_id", &"[REDACTED]")
            .field("issued_at", &self.issued_at)
            .field("expired_at", &self.expired_at)
            .finish()
    }
}
