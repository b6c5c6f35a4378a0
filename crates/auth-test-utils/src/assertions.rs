//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for sealed access tokens.

use auth_service::token::{Payload, TokenError, TokenMaker, TOKEN_HEADER};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Nonce plus authentication tag, the smallest possible sealed body.
const MIN_SEALED_LEN: usize = 12 + 16;

/// Custom assertions for access tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_sealed_format()
///     .assert_for_subject(&maker, "alice");
/// ```
pub trait TokenAssertions {
    /// Assert the token is `TOKEN_HEADER` followed by a URL-safe body
    fn assert_sealed_format(&self) -> &Self;

    /// Assert the token verifies with `maker`
    fn assert_valid_with(&self, maker: &dyn TokenMaker) -> &Self;

    /// Assert the token verifies and names `subject`
    fn assert_for_subject(&self, maker: &dyn TokenMaker, subject: &str) -> &Self;

    /// Assert verification fails with `expected`
    fn assert_rejected_with(&self, maker: &dyn TokenMaker, expected: TokenError) -> &Self;
}

fn verify(token: &str, maker: &dyn TokenMaker) -> Payload {
    match maker.verify_token(token) {
        Ok(payload) => payload,
        Err(e) => panic!("Token should verify, got error: {}", e),
    }
}

impl TokenAssertions for String {
    fn assert_sealed_format(&self) -> &Self {
        let body = self
            .strip_prefix(TOKEN_HEADER)
            .unwrap_or_else(|| panic!("Token must start with {:?}", TOKEN_HEADER));

        let decoded = URL_SAFE_NO_PAD.decode(body);
        assert!(
            decoded.is_ok(),
            "Token body must be unpadded URL-safe base64: {:?}",
            decoded.err()
        );

        let len = decoded.map(|bytes| bytes.len()).unwrap_or_default();
        assert!(
            len > MIN_SEALED_LEN,
            "Sealed body too short: {} bytes",
            len
        );
        self
    }

    fn assert_valid_with(&self, maker: &dyn TokenMaker) -> &Self {
        verify(self, maker);
        self
    }

    fn assert_for_subject(&self, maker: &dyn TokenMaker, subject: &str) -> &Self {
        let payload = verify(self, maker);
        assert_eq!(
            payload.subject_id(),
            subject,
            "Token subject mismatch"
        );
        self
    }

    fn assert_rejected_with(&self, maker: &dyn TokenMaker, expected: TokenError) -> &Self {
        match maker.verify_token(self) {
            Ok(_) => panic!("Token should be rejected with {:?}", expected),
            Err(e) => assert_eq!(e, expected, "Unexpected verification error"),
        }
        self
    }
}
