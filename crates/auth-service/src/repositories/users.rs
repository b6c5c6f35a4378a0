//! PostgreSQL-backed user store.

use super::UserStore;
use crate::errors::AuthError;
use crate::models::{CreateUserParams, User};
use crate::observability::metrics::record_db_query;
use sqlx::PgPool;
use std::time::Instant;
use uuid::Uuid;

const USERS_TABLE: &str = "users";

/// User store over a shared connection pool.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn status_of<T>(result: &Result<T, sqlx::Error>) -> &'static str {
    if result.is_ok() {
        "success"
    } else {
        "error"
    }
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, params: CreateUserParams) -> Result<User, AuthError> {
        let start = Instant::now();
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, name, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, name, password_hash, created_at
            "#,
        )
        .bind(params.id)
        .bind(&params.username)
        .bind(&params.email)
        .bind(&params.name)
        .bind(&params.password_hash)
        .fetch_one(&self.pool)
        .await;
        record_db_query("insert", USERS_TABLE, status_of(&result), start.elapsed());

        result.map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AuthError::Conflict("Username or email already exists".to_string())
            }
            _ => AuthError::Database(format!("Failed to create user: {}", e)),
        })
    }

    async fn get_user(&self, username: &str) -> Result<Option<User>, AuthError> {
        let start = Instant::now();
        let result = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, name, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await;
        record_db_query("select", USERS_TABLE, status_of(&result), start.elapsed());

        result.map_err(|e| AuthError::Database(format!("Failed to fetch user by username: {}", e)))
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
        let start = Instant::now();
        let result = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, name, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        record_db_query("select", USERS_TABLE, status_of(&result), start.elapsed());

        result.map_err(|e| AuthError::Database(format!("Failed to fetch user by id: {}", e)))
    }
}
