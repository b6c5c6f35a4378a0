//! # Auth Test Utilities
//!
//! Shared test utilities for the auth service.
//!
//! This crate provides:
//! - Deterministic key fixtures (fixed symmetric keys for reproducible tests)
//! - Test data builders (TestTokenBuilder, TestUserBuilder)
//! - Server test harness (TestAuthServer for E2E tests, no database needed)
//! - Custom assertions (TokenAssertions trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestAuthServer::spawn().await?;
//!
//!     let token = server.register(&TestUserBuilder::new().with_username("alice")).await?;
//!
//!     token.assert_sealed_format()
//!          .assert_valid_with(server.token_maker());
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod crypto_fixtures;
pub mod server_harness;
pub mod token_builders;

// Re-export commonly used items
pub use assertions::*;
pub use crypto_fixtures::*;
pub use server_harness::*;
pub use token_builders::*;
