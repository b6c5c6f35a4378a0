//! Secret types for values that must never reach a log line.
//!
//! Re-exports [`secrecy`] so every crate in the workspace wraps sensitive
//! material the same way. `SecretString` and `SecretBox<T>` print as
//! `[REDACTED]` under `Debug`, so a struct that derives `Debug` stays safe to
//! trace even when one of its fields is a secret. Values are zeroized on drop.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct LoginAttempt {
//!     username: String,
//!     password: SecretString,
//! }
//!
//! let attempt = LoginAttempt {
//!     username: "alice".to_string(),
//!     password: SecretString::from("hunter2"),
//! };
//!
//! assert!(!format!("{attempt:?}").contains("hunter2"));
//! assert_eq!(attempt.password.expose_secret(), "hunter2");
//! ```
//!
//! # What goes in a secret
//!
//! - the token symmetric key
//! - user passwords on their way to bcrypt
//! - issued access tokens while they sit in test fixtures
//!
//! Deserialization works through secrecy's `serde` feature, so request bodies
//! can declare `password: SecretString` directly.

pub use secrecy::{ExposeSecret, SecretBox, SecretString};
