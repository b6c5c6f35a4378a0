//! Deterministic key fixtures for testing
//!
//! Keys are printable ASCII so the same value works as a raw key and as the
//! `TOKEN_SYMMETRIC_KEY` environment variable.

use auth_service::token::{SealedTokenMaker, TokenError, SYMMETRIC_KEY_SIZE};

/// Generate a deterministic 32-character symmetric key for testing.
///
/// The same seed always produces the same key. The first two characters
/// spell the seed's high and low nibbles (`a`..=`p`), so different seeds
/// always produce different keys.
///
/// # Example
/// ```rust,ignore
/// let key = test_symmetric_key(1);
/// assert_eq!(key, test_symmetric_key(1));
/// assert_ne!(key, test_symmetric_key(2));
/// ```
pub fn test_symmetric_key(seed: u8) -> String {
    let prefix = [seed >> 4, seed & 0x0f].map(|nibble| char::from(b'a' + nibble));

    let filler = (2..SYMMETRIC_KEY_SIZE).map(|i| {
        let i = i as u8;
        let offset = seed.wrapping_mul(31).wrapping_add(i.wrapping_mul(7)) % 26;
        char::from(b'a' + offset)
    });

    prefix.into_iter().chain(filler).collect()
}

/// Build a token maker from `test_symmetric_key(seed)`.
pub fn test_token_maker(seed: u8) -> Result<SealedTokenMaker, TokenError> {
    SealedTokenMaker::new(test_symmetric_key(seed).as_bytes())
}
