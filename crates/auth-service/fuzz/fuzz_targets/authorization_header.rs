#![no_main]

use auth_service::middleware::extract_bearer_token;
use axum::http::{header, HeaderMap, HeaderValue};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = HeaderValue::from_bytes(data) else {
        return;
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, value);

    if let Ok(token) = extract_bearer_token(&headers) {
        assert!(!token.is_empty());
        assert!(!token.contains(' '));
    }
});
