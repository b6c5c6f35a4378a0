//! Business logic layer.

pub mod user_service;
