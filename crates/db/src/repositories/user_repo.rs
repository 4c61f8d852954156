//! Repository for the `users` table.
//!
//! Besides row access this feeds the render path: message placeholders
//! resolve through [`UserRepo::display_name`].

use depot_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::User;

/// Shared `users` column list.
const COLUMNS: &str = "id, full_name, email, is_active, created_at, updated_at";

/// Persistence and lookups for user rows.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user, returning the row as stored.
    pub async fn create(pool: &PgPool, full_name: &str, email: &str) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (full_name, email)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(full_name)
            .bind(email)
            .fetch_one(pool)
            .await
    }

    /// Look up a user by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up the display name used for message placeholders.
    ///
    /// Returns `None` for unknown users.
    pub async fn display_name(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT full_name FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
