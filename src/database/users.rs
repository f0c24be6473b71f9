// ABOUTME: User management database operations
// ABOUTME: Handles user creation and lookup

use super::Database;
use crate::models::User;
use anyhow::Result;
use chrono::Utc;
use sqlx::Row;

impl Database {
    /// Create the users table
    pub(super) async fn migrate_users(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                display_name TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_username ON users(username)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the username is already taken or the insert
    /// fails.
    pub async fn create_user(&self, username: &str, display_name: Option<&str>) -> Result<User> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (username, display_name, created_at) VALUES (?, ?, ?)",
        )
        .bind(username)
        .bind(display_name)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            display_name: display_name.map(ToString::to_string),
            created_at,
        })
    }

    /// Look up a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, display_name, created_at FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| {
            Ok(User {
                id: r.try_get("id")?,
                username: r.try_get("username")?,
                display_name: r.try_get("display_name")?,
                created_at: r.try_get("created_at")?,
            })
        })
        .transpose()
    }
}
