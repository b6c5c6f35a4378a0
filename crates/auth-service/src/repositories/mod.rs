//! User persistence.
//!
//! Handlers talk to storage through [`UserStore`] so the service runs against
//! PostgreSQL in production and an in-process map in tests.

mod memory;
mod users;

pub use memory::InMemoryUserStore;
pub use users::PgUserStore;

use crate::errors::AuthError;
use crate::models::{CreateUserParams, User};
use uuid::Uuid;

/// Storage operations for user accounts.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// Returns `AuthError::Conflict` when the username or email is taken.
    async fn create_user(&self, params: CreateUserParams) -> Result<User, AuthError>;

    /// Look up a user by username.
    async fn get_user(&self, username: &str) -> Result<Option<User>, AuthError>;

    /// Look up a user by id.
    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;
}
