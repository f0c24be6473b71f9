// ABOUTME: Exercise catalog database operations
// ABOUTME: Handles muscle groups, equipment and exercise definitions

use super::Database;
use crate::models::{Equipment, Exercise, MuscleGroup};
use anyhow::Result;
use sqlx::Row;

fn map_exercise(row: &sqlx::sqlite::SqliteRow) -> Result<Exercise> {
    Ok(Exercise {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        muscle_group_id: row.try_get("muscle_group_id")?,
        equipment_id: row.try_get("equipment_id")?,
    })
}

impl Database {
    /// Create the catalog tables
    pub(super) async fn migrate_exercises(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS muscle_groups (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS equipment (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL,
                muscle_group_id INTEGER NOT NULL REFERENCES muscle_groups(id),
                equipment_id INTEGER NOT NULL REFERENCES equipment(id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_exercises_name ON exercises(name)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get or create a muscle group by name
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert or lookup fails.
    pub async fn get_or_create_muscle_group(&self, name: &str) -> Result<MuscleGroup> {
        sqlx::query("INSERT INTO muscle_groups (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
            .bind(name)
            .execute(&self.pool)
            .await?;

        let row = sqlx::query("SELECT id, name FROM muscle_groups WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(MuscleGroup {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        })
    }

    /// Get or create an equipment entry by name
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert or lookup fails.
    pub async fn get_or_create_equipment(&self, name: &str) -> Result<Equipment> {
        sqlx::query("INSERT INTO equipment (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
            .bind(name)
            .execute(&self.pool)
            .await?;

        let row = sqlx::query("SELECT id, name FROM equipment WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(Equipment {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        })
    }

    /// Create an exercise definition
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or a referenced catalog row
    /// does not exist.
    pub async fn create_exercise(
        &self,
        name: &str,
        muscle_group_id: i64,
        equipment_id: i64,
    ) -> Result<Exercise> {
        let result = sqlx::query(
            "INSERT INTO exercises (name, muscle_group_id, equipment_id) VALUES (?, ?, ?)",
        )
        .bind(name)
        .bind(muscle_group_id)
        .bind(equipment_id)
        .execute(&self.pool)
        .await?;

        Ok(Exercise {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            muscle_group_id,
            equipment_id,
        })
    }

    /// Look up an exercise by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_exercise(&self, exercise_id: i64) -> Result<Option<Exercise>> {
        let row = sqlx::query(
            "SELECT id, name, muscle_group_id, equipment_id FROM exercises WHERE id = ?",
        )
        .bind(exercise_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_exercise).transpose()
    }

    /// List the whole exercise catalog, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_exercises(&self) -> Result<Vec<Exercise>> {
        let rows = sqlx::query(
            "SELECT id, name, muscle_group_id, equipment_id FROM exercises ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_exercise).collect()
    }
}
