//! ChaCha20-Poly1305 sealed tokens.
//!
//! Wire format:
//!
//! ```text
//! atk.v1.<base64url-nopad(nonce[12] || ciphertext || tag[16])>
//! ```
//!
//! The header is bound as associated data, so a token cannot be replayed
//! under a different version prefix. Every token carries a fresh random nonce.

use super::{Payload, TokenError, TokenMaker};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Duration;
use ring::{
    aead::{Aad, LessSafeKey, Nonce, UnboundKey, CHACHA20_POLY1305, NONCE_LEN},
    rand::{SecureRandom, SystemRandom},
};
use std::fmt;
use tracing::instrument;

/// Required symmetric key length in bytes.
pub const SYMMETRIC_KEY_SIZE: usize = 32;

/// Version prefix of every sealed token.
pub const TOKEN_HEADER: &str = "atk.v1.";

/// Tokens longer than this are rejected before decoding.
pub const MAX_TOKEN_SIZE_BYTES: usize = 4096;

const TAG_LEN: usize = 16;

/// [`TokenMaker`] backed by ChaCha20-Poly1305 authenticated encryption.
pub struct SealedTokenMaker {
    key: LessSafeKey,
    rng: SystemRandom,
}

impl SealedTokenMaker {
    /// Build a maker from raw key bytes.
    ///
    /// Fails with [`TokenError::InvalidKeySize`] unless `key` is exactly
    /// [`SYMMETRIC_KEY_SIZE`] bytes.
    pub fn new(key: &[u8]) -> Result<Self, TokenError> {
        if key.len() != SYMMETRIC_KEY_SIZE {
            return Err(TokenError::InvalidKeySize {
                expected: SYMMETRIC_KEY_SIZE,
                actual: key.len(),
            });
        }

        let unbound_key = UnboundKey::new(&CHACHA20_POLY1305, key)
            .map_err(|e| TokenError::Internal(format!("Cipher key creation failed: {}", e)))?;

        Ok(Self {
            key: LessSafeKey::new(unbound_key),
            rng: SystemRandom::new(),
        })
    }

    fn seal(&self, plaintext: &[u8]) -> Result<String, TokenError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|e| TokenError::Internal(format!("Nonce generation failed: {}", e)))?;

        let mut in_out = plaintext.to_vec();
        self.key
            .seal_in_place_append_tag(
                Nonce::assume_unique_for_key(nonce_bytes),
                Aad::from(TOKEN_HEADER.as_bytes()),
                &mut in_out,
            )
            .map_err(|e| TokenError::Internal(format!("Encryption operation failed: {}", e)))?;

        let mut envelope = Vec::with_capacity(NONCE_LEN + in_out.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&in_out);

        Ok(format!("{}{}", TOKEN_HEADER, URL_SAFE_NO_PAD.encode(envelope)))
    }

    fn open(&self, token: &str) -> Result<Vec<u8>, TokenError> {
        if token.len() > MAX_TOKEN_SIZE_BYTES {
            tracing::debug!(
                target: "auth.token",
                token_size = token.len(),
                max_size = MAX_TOKEN_SIZE_BYTES,
                "Token rejected: size exceeds maximum allowed"
            );
            return Err(TokenError::Invalid);
        }

        let encoded = token.strip_prefix(TOKEN_HEADER).ok_or_else(|| {
            tracing::debug!(target: "auth.token", "Token rejected: unknown header");
            TokenError::Invalid
        })?;

        let envelope = URL_SAFE_NO_PAD.decode(encoded).map_err(|e| {
            tracing::debug!(target: "auth.token", error = %e, "Token rejected: bad encoding");
            TokenError::Invalid
        })?;

        if envelope.len() < NONCE_LEN + TAG_LEN {
            tracing::debug!(
                target: "auth.token",
                envelope_size = envelope.len(),
                "Token rejected: envelope too short"
            );
            return Err(TokenError::Invalid);
        }

        let (nonce_part, sealed) = envelope
            .split_at_checked(NONCE_LEN)
            .ok_or(TokenError::Invalid)?;
        let nonce_bytes: [u8; NONCE_LEN] =
            nonce_part.try_into().map_err(|_| TokenError::Invalid)?;

        let mut in_out = sealed.to_vec();
        let plaintext = self
            .key
            .open_in_place(
                Nonce::assume_unique_for_key(nonce_bytes),
                Aad::from(TOKEN_HEADER.as_bytes()),
                &mut in_out,
            )
            .map_err(|_| {
                tracing::debug!(target: "auth.token", "Token rejected: authentication failed");
                TokenError::Invalid
            })?;

        Ok(plaintext.to_vec())
    }
}

impl TokenMaker for SealedTokenMaker {
    #[instrument(skip_all)]
    fn create_token(&self, subject_id: &str, duration: Duration) -> Result<String, TokenError> {
        let payload = Payload::new(subject_id, duration)?;

        let plaintext = serde_json::to_vec(&payload)
            .map_err(|e| TokenError::Internal(format!("Payload serialization failed: {}", e)))?;

        self.seal(&plaintext)
    }

    #[instrument(skip_all)]
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let plaintext = self.open(token)?;

        let payload: Payload = serde_json::from_slice(&plaintext).map_err(|e| {
            tracing::debug!(target: "auth.token", error = %e, "Token rejected: malformed payload");
            TokenError::Invalid
        })?;

        payload.valid().inspect_err(|_| {
            tracing::debug!(
                target: "auth.token",
                expired_at = %payload.expired_at(),
                "Token rejected: expired"
            );
        })?;

        Ok(payload)
    }
}

impl fmt::Debug for SealedTokenMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealedTokenMaker")
            .field("algorithm", &"CHACHA20_POLY1305")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
