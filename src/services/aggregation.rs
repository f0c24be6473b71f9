// ABOUTME: Aggregation engine folding logged workouts into the progress ledger
// ABOUTME: Computes per-line metrics and merges them per (user, exercise, day)

use tracing::{debug, error};

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::Workout;

/// Fold every exercise line of `workout` into the progress ledger.
///
/// Lines are processed in logged order and independently: each line's
/// merge commits on its own, so a failure partway leaves earlier lines
/// applied (there is no all-or-nothing transaction across lines). Order
/// still matters for `avg_weight`, whose running average folds later
/// lines against the accumulated mean.
///
/// # Errors
///
/// Returns a database error for the first line whose merge fails; the
/// remaining lines are not attempted.
pub async fn ingest_workout(database: &Database, user_id: i64, workout: &Workout) -> AppResult<()> {
    for line in &workout.lines {
        let metrics = line.metrics();

        let progress = database
            .merge_contribution(user_id, line.exercise_id, workout.date, &metrics)
            .await
            .map_err(|e| {
                error!(
                    user_id,
                    exercise_id = line.exercise_id,
                    "Failed to merge progress contribution: {e}"
                );
                AppError::database(format!(
                    "Failed to update progress for exercise {}: {e}",
                    line.exercise_id
                ))
            })?;

        debug!(
            user_id,
            exercise_id = line.exercise_id,
            date = %workout.date,
            total_volume = progress.total_volume,
            "Merged workout line into progress ledger"
        );
    }

    Ok(())
}
