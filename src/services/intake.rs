// ABOUTME: Validated intake of agent payloads into persisted records
// ABOUTME: Schema plus catalog validation, then persistence through the pipeline

use tracing::info;

use crate::database::{Database, NewMeal, NewWorkout, NewWorkoutLine};
use crate::errors::{AppError, AppResult, ValidationErrors};
use crate::models::{MealEntry, Workout};
use crate::payloads::{MealPayload, WorkoutPayload};
use crate::services::{aggregation, daily_log};

/// Fully validate a workout payload: schema shape plus catalog checks.
///
/// Unknown user and exercise ids are reported through the same
/// `field -> reason` map as structural failures, so the agent receives
/// one complete report.
///
/// # Errors
///
/// Returns a validation error carrying the report, or a database error
/// if a catalog lookup fails.
pub async fn validate_workout(database: &Database, payload: &WorkoutPayload) -> AppResult<()> {
    let mut report = match payload.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(report) => report,
    };

    if let Some(user_id) = payload.user_id {
        let user = database
            .get_user(user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up user: {e}")))?;
        if user.is_none() {
            report.insert("user_id".into(), format!("unknown user {user_id}"));
        }
    }

    for (index, line) in payload.exercises.iter().enumerate() {
        if let Some(exercise_id) = line.exercise_id {
            let exercise = database
                .get_exercise(exercise_id)
                .await
                .map_err(|e| AppError::database(format!("Failed to look up exercise: {e}")))?;
            if exercise.is_none() {
                report.insert(
                    format!("exercises[{index}].exercise_id"),
                    format!("unknown exercise {exercise_id}"),
                );
            }
        }
    }

    if report.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(&report))
    }
}

/// Fully validate a meal payload: schema shape plus user check.
///
/// # Errors
///
/// Returns a validation error carrying the report, or a database error
/// if the user lookup fails.
pub async fn validate_meal(database: &Database, payload: &MealPayload) -> AppResult<()> {
    let mut report = match payload.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(report) => report,
    };

    if let Some(user_id) = payload.user_id {
        let user = database
            .get_user(user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up user: {e}")))?;
        if user.is_none() {
            report.insert("user_id".into(), format!("unknown user {user_id}"));
        }
    }

    if report.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(&report))
    }
}

/// Persist a validated workout payload through the full pipeline:
/// create the record, fold it into the progress ledger, attach it to its
/// daily log.
///
/// # Errors
///
/// Returns a validation error when the payload does not pass
/// [`validate_workout`], or a database error from any pipeline stage.
/// Earlier stages are not rolled back when a later stage fails.
pub async fn persist_workout(database: &Database, payload: &WorkoutPayload) -> AppResult<Workout> {
    validate_workout(database, payload).await?;

    // validate_workout guarantees these are present
    let (Some(user_id), Some(name), Some(date)) =
        (payload.user_id, payload.name.as_deref(), payload.date)
    else {
        return Err(AppError::internal("validated workout payload missing fields"));
    };

    let lines = payload
        .exercises
        .iter()
        .filter_map(|line| {
            line.exercise_id.map(|exercise_id| NewWorkoutLine {
                exercise_id,
                sets: line.sets,
                reps: line.reps,
                weight: line.weight,
                rest_seconds: line.rest_seconds,
                notes: line.notes.clone(),
                order_index: line.order,
            })
        })
        .collect();

    let workout = database
        .create_workout(&NewWorkout {
            user_id,
            name: name.to_string(),
            date,
            notes: payload.notes.clone(),
            lines,
        })
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

    aggregation::ingest_workout(database, user_id, &workout).await?;
    daily_log::attach_workout(database, user_id, &workout).await?;

    info!(user_id, workout_id = workout.id, "Created workout from agent payload");

    Ok(workout)
}

/// Persist a validated meal payload: create the record and attach it to
/// its daily log.
///
/// # Errors
///
/// Returns a validation error when the payload does not pass
/// [`validate_meal`], or a database error from persistence.
pub async fn persist_meal(database: &Database, payload: &MealPayload) -> AppResult<MealEntry> {
    validate_meal(database, payload).await?;

    let (Some(user_id), Some(name), Some(calories), Some(protein), Some(date)) = (
        payload.user_id,
        payload.name.as_deref(),
        payload.calories,
        payload.protein,
        payload.date,
    ) else {
        return Err(AppError::internal("validated meal payload missing fields"));
    };

    let meal = database
        .create_meal(&NewMeal {
            user_id,
            name,
            calories,
            protein,
            carbs: payload.carbs,
            fats: payload.fats,
            date,
        })
        .await
        .map_err(|e| AppError::database(format!("Failed to create meal: {e}")))?;

    daily_log::attach_meal(database, user_id, &meal).await?;

    info!(user_id, meal_id = meal.id, "Created meal from agent payload");

    Ok(meal)
}
