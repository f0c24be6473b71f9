// ABOUTME: Meal entry database operations
// ABOUTME: Handles meal persistence, lookup and deletion

use super::Database;
use crate::models::MealEntry;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::Row;

fn map_meal(row: &sqlx::sqlite::SqliteRow) -> Result<MealEntry> {
    let calories: i64 = row.try_get("calories")?;
    let protein: i64 = row.try_get("protein")?;
    let carbs: Option<i64> = row.try_get("carbs")?;
    let fats: Option<i64> = row.try_get("fats")?;

    Ok(MealEntry {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        calories: calories as u32,
        protein: protein as u32,
        carbs: carbs.map(|v| v as u32),
        fats: fats.map(|v| v as u32),
        date: row.try_get("date")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Parameters for a new meal entry
#[derive(Debug, Clone)]
pub struct NewMeal<'a> {
    /// Owning user
    pub user_id: i64,
    /// Meal name
    pub name: &'a str,
    /// Total calories
    pub calories: u32,
    /// Protein grams
    pub protein: u32,
    /// Carbohydrate grams, if tracked
    pub carbs: Option<u32>,
    /// Fat grams, if tracked
    pub fats: Option<u32>,
    /// Calendar day the meal occurred on
    pub date: NaiveDate,
}

impl Database {
    /// Create the meal table
    pub(super) async fn migrate_meals(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meal_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                calories INTEGER NOT NULL,
                protein INTEGER NOT NULL,
                carbs INTEGER,
                fats INTEGER,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_meal_entries_user_date ON meal_entries(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Persist a meal entry
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the insert fails.
    pub async fn create_meal(&self, new: &NewMeal<'_>) -> Result<MealEntry> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO meal_entries (user_id, name, calories, protein, carbs, fats, date, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(new.user_id)
        .bind(new.name)
        .bind(i64::from(new.calories))
        .bind(i64::from(new.protein))
        .bind(new.carbs.map(i64::from))
        .bind(new.fats.map(i64::from))
        .bind(new.date)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(MealEntry {
            id: result.last_insert_rowid(),
            user_id: new.user_id,
            name: new.name.to_string(),
            calories: new.calories,
            protein: new.protein,
            carbs: new.carbs,
            fats: new.fats,
            date: new.date,
            created_at,
        })
    }

    /// Look up a meal by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_meal(&self, meal_id: i64) -> Result<Option<MealEntry>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, name, calories, protein, carbs, fats, date, created_at
            FROM meal_entries WHERE id = ?
            ",
        )
        .bind(meal_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_meal).transpose()
    }

    /// Fetch the meals linked to a daily log, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn meals_for_daily_log(&self, daily_log_id: i64) -> Result<Vec<MealEntry>> {
        let rows = sqlx::query(
            r"
            SELECT m.id, m.user_id, m.name, m.calories, m.protein, m.carbs, m.fats,
                   m.date, m.created_at
            FROM meal_entries m
            JOIN daily_log_meals dlm ON dlm.meal_id = m.id
            WHERE dlm.daily_log_id = ?
            ORDER BY m.date DESC, m.created_at DESC
            ",
        )
        .bind(daily_log_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_meal).collect()
    }

    /// Delete a meal entry
    ///
    /// Returns `false` when no such meal existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_meal(&self, meal_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM meal_entries WHERE id = ?")
            .bind(meal_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
