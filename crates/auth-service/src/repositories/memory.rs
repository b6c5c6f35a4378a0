//! In-process user store.
//!
//! Enforces the same uniqueness rules as the `users` table. Used by the test
//! harness and by unit tests that exercise handlers without a database.

use super::UserStore;
use crate::errors::AuthError;
use crate::models::{CreateUserParams, User};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
    fail: AtomicBool,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose every operation returns `AuthError::Database`.
    pub fn failing() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            fail: AtomicBool::new(true),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), AuthError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AuthError::Database("In-memory store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, params: CreateUserParams) -> Result<User, AuthError> {
        self.check_available()?;

        let mut users = self.users.write().await;
        let taken = users.values().any(|existing| {
            existing.username == params.username || existing.email == params.email
        });
        if taken || users.contains_key(&params.id) {
            return Err(AuthError::Conflict(
                "Username or email already exists".to_string(),
            ));
        }

        let user = User {
            id: params.id,
            username: params.username,
            email: params.email,
            name: params.name,
            password_hash: params.password_hash,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get_user(&self, username: &str) -> Result<Option<User>, AuthError> {
        self.check_available()?;

        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
        self.check_available()?;

        Ok(self.users.read().await.get(&id).cloned())
    }
}
