//! Shared building blocks for the sealed-token workspace.

#![warn(clippy::pedantic)]

/// Secret wrappers that keep keys, passwords and tokens out of logs
pub mod secret;
