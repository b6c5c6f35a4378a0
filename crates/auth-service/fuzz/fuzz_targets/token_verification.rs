#![no_main]

use auth_service::token::{SealedTokenMaker, TokenError, TokenMaker};
use libfuzzer_sys::fuzz_target;

const FUZZ_KEY: &[u8; 32] = b"fuzz-key-fuzz-key-fuzz-key-fuzz!";

fuzz_target!(|data: &[u8]| {
    let Ok(maker) = SealedTokenMaker::new(FUZZ_KEY) else {
        return;
    };

    if let Ok(token) = std::str::from_utf8(data) {
        // Arbitrary input must never verify and never panic.
        match maker.verify_token(token) {
            Ok(_) => panic!("forged token verified"),
            Err(TokenError::Invalid) | Err(TokenError::Expired) => {}
            Err(other) => panic!("unexpected error kind: {:?}", other),
        }
    }
});
