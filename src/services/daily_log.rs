// ABOUTME: Daily-log assembler bucketing workouts and meals by calendar day
// ABOUTME: Idempotent get-or-create plus attach/detach with nutrition totals

use tracing::debug;

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{DailyLog, MealEntry, Workout};

/// Associate a workout with the daily log for its own date.
///
/// The bucket is created lazily; attaching the same workout twice is a
/// no-op.
///
/// # Errors
///
/// Returns a database error if the bucket cannot be created or linked.
pub async fn attach_workout(
    database: &Database,
    user_id: i64,
    workout: &Workout,
) -> AppResult<DailyLog> {
    let log = database
        .get_or_create_daily_log(user_id, workout.date)
        .await
        .map_err(|e| AppError::database(format!("Failed to open daily log: {e}")))?;

    database
        .link_workout_to_daily_log(log.id, workout.id)
        .await
        .map_err(|e| AppError::database(format!("Failed to attach workout: {e}")))?;

    debug!(user_id, workout_id = workout.id, date = %workout.date, "Attached workout to daily log");

    Ok(log)
}

/// Associate a meal with the daily log for its own date.
///
/// Linking refreshes the log's nutrition totals from the full linked
/// meal set, so a repeated attach changes nothing.
///
/// # Errors
///
/// Returns a database error if the bucket cannot be created or linked.
pub async fn attach_meal(database: &Database, user_id: i64, meal: &MealEntry) -> AppResult<DailyLog> {
    let log = database
        .get_or_create_daily_log(user_id, meal.date)
        .await
        .map_err(|e| AppError::database(format!("Failed to open daily log: {e}")))?;

    database
        .link_meal_to_daily_log(log.id, meal.id)
        .await
        .map_err(|e| AppError::database(format!("Failed to attach meal: {e}")))?;

    debug!(user_id, meal_id = meal.id, date = %meal.date, "Attached meal to daily log");

    // Return the bucket with its refreshed totals
    let refreshed = database
        .find_daily_log(user_id, meal.date)
        .await
        .map_err(|e| AppError::database(format!("Failed to reload daily log: {e}")))?;

    Ok(refreshed.unwrap_or(log))
}

/// Remove a workout from its day's log, if that log exists.
///
/// A missing log is a silent no-op, not an error: deletion of a record
/// whose day was never viewed or logged must still succeed.
///
/// # Errors
///
/// Returns a database error if the lookup or unlink fails.
pub async fn detach_workout(database: &Database, user_id: i64, workout: &Workout) -> AppResult<()> {
    let Some(log) = database
        .find_daily_log(user_id, workout.date)
        .await
        .map_err(|e| AppError::database(format!("Failed to look up daily log: {e}")))?
    else {
        return Ok(());
    };

    database
        .unlink_workout_from_daily_log(log.id, workout.id)
        .await
        .map_err(|e| AppError::database(format!("Failed to detach workout: {e}")))?;

    Ok(())
}

/// Remove a meal from its day's log, refreshing the nutrition totals.
///
/// A missing log is a silent no-op.
///
/// # Errors
///
/// Returns a database error if the lookup or unlink fails.
pub async fn detach_meal(database: &Database, user_id: i64, meal: &MealEntry) -> AppResult<()> {
    let Some(log) = database
        .find_daily_log(user_id, meal.date)
        .await
        .map_err(|e| AppError::database(format!("Failed to look up daily log: {e}")))?
    else {
        return Ok(());
    };

    database
        .unlink_meal_from_daily_log(log.id, meal.id)
        .await
        .map_err(|e| AppError::database(format!("Failed to detach meal: {e}")))?;

    Ok(())
}

/// Get or lazily create the daily log a user is viewing.
///
/// # Errors
///
/// Returns a database error if the bucket cannot be created.
pub async fn view_daily_log(
    database: &Database,
    user_id: i64,
    date: chrono::NaiveDate,
) -> AppResult<DailyLog> {
    database
        .get_or_create_daily_log(user_id, date)
        .await
        .map_err(|e| AppError::database(format!("Failed to open daily log: {e}")))
}
