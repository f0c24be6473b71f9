// ABOUTME: Staged-workout workflow for agent proposals awaiting confirmation
// ABOUTME: Single-slot per-user register with stage, view, finalize, discard

use serde_json::Value;
use tracing::info;

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{StagedWorkout, Workout};
use crate::payloads::WorkoutPayload;
use crate::services::intake;

/// Stage an agent-proposed workout for later confirmation.
///
/// The payload is fully validated first, then stored verbatim as the
/// user's live slot, replacing any prior proposal (there is no queue).
///
/// # Errors
///
/// Returns the validation report when the payload is invalid; nothing is
/// stored in that case.
pub async fn stage(database: &Database, payload: &Value) -> AppResult<StagedWorkout> {
    let parsed: WorkoutPayload = serde_json::from_value(payload.clone())
        .map_err(|e| AppError::invalid_input(format!("Malformed workout payload: {e}")))?;

    intake::validate_workout(database, &parsed).await?;

    // validate_workout guarantees user_id is present and known
    let Some(user_id) = parsed.user_id else {
        return Err(AppError::internal("validated workout payload missing user"));
    };

    let staged = database
        .upsert_staged_workout(user_id, payload)
        .await
        .map_err(|e| AppError::database(format!("Failed to stage workout: {e}")))?;

    info!(user_id, "Staged workout proposal for confirmation");

    Ok(staged)
}

/// Read the live staged slot without transitioning state.
///
/// # Errors
///
/// Returns a database error if the lookup fails.
pub async fn current(database: &Database, user_id: i64) -> AppResult<Option<StagedWorkout>> {
    database
        .get_staged_workout(user_id)
        .await
        .map_err(|e| AppError::database(format!("Failed to read staged workout: {e}")))
}

/// Confirm the staged proposal: re-validate, persist through the full
/// pipeline (aggregation + daily log), then clear the slot.
///
/// On validation failure the slot is left intact so the user can discard
/// or re-stage; the error carries the field report.
///
/// # Errors
///
/// Returns not-found when no slot exists, the validation report when the
/// stored payload no longer validates, or a database error from the
/// pipeline.
pub async fn finalize(database: &Database, user_id: i64) -> AppResult<Workout> {
    let Some(staged) = current(database, user_id).await? else {
        return Err(AppError::not_found(format!(
            "Staged workout for user {user_id}"
        )));
    };

    let parsed: WorkoutPayload = serde_json::from_value(staged.payload)
        .map_err(|e| AppError::invalid_input(format!("Malformed staged payload: {e}")))?;

    let workout = intake::persist_workout(database, &parsed).await?;

    database
        .delete_staged_workout(user_id)
        .await
        .map_err(|e| AppError::database(format!("Failed to clear staged workout: {e}")))?;

    info!(user_id, workout_id = workout.id, "Finalized staged workout");

    Ok(workout)
}

/// Drop the staged proposal unconditionally; no validation, and an empty
/// slot is not an error.
///
/// Returns `true` when a slot was actually removed.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub async fn discard(database: &Database, user_id: i64) -> AppResult<bool> {
    let removed = database
        .delete_staged_workout(user_id)
        .await
        .map_err(|e| AppError::database(format!("Failed to discard staged workout: {e}")))?;

    if removed {
        info!(user_id, "Discarded staged workout");
    }

    Ok(removed)
}
