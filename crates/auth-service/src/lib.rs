//! Auth Service Library
//!
//! Issues and verifies stateless, authenticated-encrypted access tokens and
//! exposes user registration, login and profile endpoints over HTTP.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `crypto` - Password hashing
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `middleware` - Bearer authentication and HTTP metrics
//! - `models` - Data models
//! - `observability` - Metrics
//! - `repositories` - User persistence
//! - `routes` - Router and shared state
//! - `services` - Business logic layer
//! - `token` - Access token creation and verification

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod token;
