// ABOUTME: Workout database operations
// ABOUTME: Handles workout and workout-line persistence, queries and deletion

use super::Database;
use crate::models::{Workout, WorkoutLine};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::Row;

/// Parameters for one exercise line of a new workout
#[derive(Debug, Clone)]
pub struct NewWorkoutLine {
    /// Exercise performed
    pub exercise_id: i64,
    /// Sets performed
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Working weight, if any
    pub weight: Option<f64>,
    /// Rest between sets, in seconds
    pub rest_seconds: Option<u32>,
    /// Free-text notes
    pub notes: String,
    /// Position within the workout
    pub order_index: u32,
}

/// Parameters for a new workout
#[derive(Debug, Clone)]
pub struct NewWorkout {
    /// Owning user
    pub user_id: i64,
    /// Session name
    pub name: String,
    /// Calendar day the session occurred on
    pub date: NaiveDate,
    /// Free-text session notes
    pub notes: String,
    /// Exercise lines in logged order
    pub lines: Vec<NewWorkoutLine>,
}

fn map_line(row: &sqlx::sqlite::SqliteRow) -> Result<WorkoutLine> {
    let sets: i64 = row.try_get("sets")?;
    let reps: i64 = row.try_get("reps")?;
    let rest_seconds: Option<i64> = row.try_get("rest_seconds")?;
    let order_index: i64 = row.try_get("order_index")?;

    Ok(WorkoutLine {
        id: row.try_get("id")?,
        workout_id: row.try_get("workout_id")?,
        exercise_id: row.try_get("exercise_id")?,
        exercise_name: row.try_get("exercise_name")?,
        sets: sets as u32,
        reps: reps as u32,
        weight: row.try_get("weight")?,
        rest_seconds: rest_seconds.map(|v| v as u32),
        notes: row.try_get("notes")?,
        order_index: order_index as u32,
    })
}

impl Database {
    /// Create the workout tables
    pub(super) async fn migrate_workouts(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                date TEXT NOT NULL,
                notes TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_lines (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id INTEGER NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                exercise_id INTEGER NOT NULL REFERENCES exercises(id),
                sets INTEGER NOT NULL,
                reps INTEGER NOT NULL,
                weight REAL,
                rest_seconds INTEGER,
                notes TEXT NOT NULL DEFAULT '',
                order_index INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workouts_user_date ON workouts(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_lines_workout ON workout_lines(workout_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Persist a workout and its exercise lines in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the user or a referenced exercise does not
    /// exist, or the insert fails. Nothing is persisted on failure.
    pub async fn create_workout(&self, new: &NewWorkout) -> Result<Workout> {
        let created_at = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO workouts (user_id, name, date, notes, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(new.user_id)
        .bind(&new.name)
        .bind(new.date)
        .bind(&new.notes)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        let workout_id = result.last_insert_rowid();

        for line in &new.lines {
            sqlx::query(
                r"
                INSERT INTO workout_lines
                    (workout_id, exercise_id, sets, reps, weight, rest_seconds, notes, order_index)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(workout_id)
            .bind(line.exercise_id)
            .bind(i64::from(line.sets))
            .bind(i64::from(line.reps))
            .bind(line.weight)
            .bind(line.rest_seconds.map(i64::from))
            .bind(&line.notes)
            .bind(i64::from(line.order_index))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let lines = self.workout_lines(workout_id).await?;

        Ok(Workout {
            id: workout_id,
            user_id: new.user_id,
            name: new.name.clone(),
            date: new.date,
            notes: new.notes.clone(),
            created_at,
            lines,
        })
    }

    /// Fetch the lines of a workout in logged order
    async fn workout_lines(&self, workout_id: i64) -> Result<Vec<WorkoutLine>> {
        let rows = sqlx::query(
            r"
            SELECT wl.id, wl.workout_id, wl.exercise_id, e.name AS exercise_name,
                   wl.sets, wl.reps, wl.weight, wl.rest_seconds, wl.notes, wl.order_index
            FROM workout_lines wl
            JOIN exercises e ON e.id = wl.exercise_id
            WHERE wl.workout_id = ?
            ORDER BY wl.order_index, wl.id
            ",
        )
        .bind(workout_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_line).collect()
    }

    async fn map_workout(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Workout> {
        let id: i64 = row.try_get("id")?;
        Ok(Workout {
            id,
            user_id: row.try_get("user_id")?,
            name: row.try_get("name")?,
            date: row.try_get("date")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
            lines: self.workout_lines(id).await?,
        })
    }

    /// Look up a workout (with lines) by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_workout(&self, workout_id: i64) -> Result<Option<Workout>> {
        let row = sqlx::query(
            "SELECT id, user_id, name, date, notes, created_at FROM workouts WHERE id = ?",
        )
        .bind(workout_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.map_workout(&row).await?)),
            None => Ok(None),
        }
    }

    /// The most-recently-dated workouts for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn recent_workouts(&self, user_id: i64, limit: i64) -> Result<Vec<Workout>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, date, notes, created_at
            FROM workouts
            WHERE user_id = ?
            ORDER BY date DESC, created_at DESC
            LIMIT ?
            ",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut workouts = Vec::with_capacity(rows.len());
        for row in &rows {
            workouts.push(self.map_workout(row).await?);
        }
        Ok(workouts)
    }

    /// Fetch the workouts linked to a daily log, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn workouts_for_daily_log(&self, daily_log_id: i64) -> Result<Vec<Workout>> {
        let rows = sqlx::query(
            r"
            SELECT w.id, w.user_id, w.name, w.date, w.notes, w.created_at
            FROM workouts w
            JOIN daily_log_workouts dlw ON dlw.workout_id = w.id
            WHERE dlw.daily_log_id = ?
            ORDER BY w.date DESC, w.created_at DESC
            ",
        )
        .bind(daily_log_id)
        .fetch_all(&self.pool)
        .await?;

        let mut workouts = Vec::with_capacity(rows.len());
        for row in &rows {
            workouts.push(self.map_workout(row).await?);
        }
        Ok(workouts)
    }

    /// Delete a workout; lines cascade
    ///
    /// Returns `false` when no such workout existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_workout(&self, workout_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = ?")
            .bind(workout_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
