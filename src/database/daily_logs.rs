// ABOUTME: Daily log database operations
// ABOUTME: Per-(user, date) buckets linking workouts and meals with nutrition totals

use super::Database;
use crate::models::DailyLog;
use anyhow::Result;
use chrono::NaiveDate;
use sqlx::{Row, Sqlite, Transaction};

fn map_daily_log(row: &sqlx::sqlite::SqliteRow) -> Result<DailyLog> {
    let total_calories: i64 = row.try_get("total_calories")?;
    let total_protein: i64 = row.try_get("total_protein")?;
    let total_carbs: i64 = row.try_get("total_carbs")?;
    let total_fats: i64 = row.try_get("total_fats")?;

    Ok(DailyLog {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        date: row.try_get("date")?,
        total_calories: total_calories as u32,
        total_protein: total_protein as u32,
        total_carbs: total_carbs as u32,
        total_fats: total_fats as u32,
    })
}

/// Recompute the four nutrition totals from the linked meal set.
///
/// Runs inside the caller's transaction so the link change and the new
/// totals land atomically.
async fn recompute_totals(tx: &mut Transaction<'_, Sqlite>, daily_log_id: i64) -> Result<()> {
    sqlx::query(
        r"
        UPDATE daily_logs
        SET total_calories = (
                SELECT COALESCE(SUM(m.calories), 0)
                FROM meal_entries m
                JOIN daily_log_meals dlm ON dlm.meal_id = m.id
                WHERE dlm.daily_log_id = daily_logs.id
            ),
            total_protein = (
                SELECT COALESCE(SUM(m.protein), 0)
                FROM meal_entries m
                JOIN daily_log_meals dlm ON dlm.meal_id = m.id
                WHERE dlm.daily_log_id = daily_logs.id
            ),
            total_carbs = (
                SELECT COALESCE(SUM(COALESCE(m.carbs, 0)), 0)
                FROM meal_entries m
                JOIN daily_log_meals dlm ON dlm.meal_id = m.id
                WHERE dlm.daily_log_id = daily_logs.id
            ),
            total_fats = (
                SELECT COALESCE(SUM(COALESCE(m.fats, 0)), 0)
                FROM meal_entries m
                JOIN daily_log_meals dlm ON dlm.meal_id = m.id
                WHERE dlm.daily_log_id = daily_logs.id
            )
        WHERE id = ?
        ",
    )
    .bind(daily_log_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

impl Database {
    /// Create the daily log tables
    pub(super) async fn migrate_daily_logs(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS daily_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                total_calories INTEGER NOT NULL DEFAULT 0,
                total_protein INTEGER NOT NULL DEFAULT 0,
                total_carbs INTEGER NOT NULL DEFAULT 0,
                total_fats INTEGER NOT NULL DEFAULT 0,
                UNIQUE(user_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS daily_log_workouts (
                daily_log_id INTEGER NOT NULL REFERENCES daily_logs(id) ON DELETE CASCADE,
                workout_id INTEGER NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                PRIMARY KEY (daily_log_id, workout_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS daily_log_meals (
                daily_log_id INTEGER NOT NULL REFERENCES daily_logs(id) ON DELETE CASCADE,
                meal_id INTEGER NOT NULL REFERENCES meal_entries(id) ON DELETE CASCADE,
                PRIMARY KEY (daily_log_id, meal_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get or lazily create the daily log for (user, date).
    ///
    /// Idempotent: the insert is a no-op when the bucket already exists,
    /// and the unique key guarantees concurrent callers converge on one
    /// row.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub async fn get_or_create_daily_log(&self, user_id: i64, date: NaiveDate) -> Result<DailyLog> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO daily_logs (user_id, date)
            VALUES (?, ?)
            ON CONFLICT(user_id, date) DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(date)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query(
            r"
            SELECT id, user_id, date, total_calories, total_protein, total_carbs, total_fats
            FROM daily_logs
            WHERE user_id = ? AND date = ?
            ",
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        map_daily_log(&row)
    }

    /// Look up the daily log for (user, date) without creating it
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_daily_log(&self, user_id: i64, date: NaiveDate) -> Result<Option<DailyLog>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, date, total_calories, total_protein, total_carbs, total_fats
            FROM daily_logs
            WHERE user_id = ? AND date = ?
            ",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_daily_log).transpose()
    }

    /// Link a workout into a daily log; re-linking is a no-op
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn link_workout_to_daily_log(
        &self,
        daily_log_id: i64,
        workout_id: i64,
    ) -> Result<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO daily_log_workouts (daily_log_id, workout_id) VALUES (?, ?)",
        )
        .bind(daily_log_id)
        .bind(workout_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a workout link if present
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn unlink_workout_from_daily_log(
        &self,
        daily_log_id: i64,
        workout_id: i64,
    ) -> Result<()> {
        sqlx::query("DELETE FROM daily_log_workouts WHERE daily_log_id = ? AND workout_id = ?")
            .bind(daily_log_id)
            .bind(workout_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Link a meal into a daily log and refresh the nutrition totals.
    ///
    /// Link and totals change in one transaction; re-linking is a no-op
    /// (the totals recompute is idempotent).
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub async fn link_meal_to_daily_log(&self, daily_log_id: i64, meal_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT OR IGNORE INTO daily_log_meals (daily_log_id, meal_id) VALUES (?, ?)")
            .bind(daily_log_id)
            .bind(meal_id)
            .execute(&mut *tx)
            .await?;

        recompute_totals(&mut tx, daily_log_id).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Remove a meal link if present and refresh the nutrition totals
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub async fn unlink_meal_from_daily_log(&self, daily_log_id: i64, meal_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM daily_log_meals WHERE daily_log_id = ? AND meal_id = ?")
            .bind(daily_log_id)
            .bind(meal_id)
            .execute(&mut *tx)
            .await?;

        recompute_totals(&mut tx, daily_log_id).await?;

        tx.commit().await?;

        Ok(())
    }
}
