// ABOUTME: Staged workout database operations
// ABOUTME: Single-slot per-user register of unconfirmed agent workout proposals

use super::Database;
use crate::models::StagedWorkout;
use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::Row;

fn map_staged(row: &sqlx::sqlite::SqliteRow) -> Result<StagedWorkout> {
    let raw: String = row.try_get("payload")?;
    let payload =
        serde_json::from_str(&raw).context("staged workout payload is not valid JSON")?;

    Ok(StagedWorkout {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        payload,
        created_at: row.try_get("created_at")?,
    })
}

impl Database {
    /// Create the staged workout table
    pub(super) async fn migrate_staged(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS staged_workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER UNIQUE NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                payload TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store a staged payload for the user, replacing any prior slot.
    ///
    /// The UNIQUE constraint on `user_id` makes this a true single-slot
    /// register: only the most recent proposal survives.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub async fn upsert_staged_workout(
        &self,
        user_id: i64,
        payload: &serde_json::Value,
    ) -> Result<StagedWorkout> {
        let raw = serde_json::to_string(payload)?;
        let created_at = Utc::now();

        sqlx::query(
            r"
            INSERT INTO staged_workouts (user_id, payload, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                payload = excluded.payload,
                created_at = excluded.created_at
            ",
        )
        .bind(user_id)
        .bind(&raw)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query(
            "SELECT id, user_id, payload, created_at FROM staged_workouts WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        map_staged(&row)
    }

    /// Read the live staged slot for a user, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored payload is
    /// corrupt.
    pub async fn get_staged_workout(&self, user_id: i64) -> Result<Option<StagedWorkout>> {
        let row = sqlx::query(
            "SELECT id, user_id, payload, created_at FROM staged_workouts WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_staged).transpose()
    }

    /// Delete the staged slot for a user
    ///
    /// Returns `false` when no slot existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_staged_workout(&self, user_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM staged_workouts WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
