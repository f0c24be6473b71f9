// ABOUTME: Progress dashboard route handlers
// ABOUTME: Combines the daily bucket with per-exercise progress trends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Progress dashboard routes
//!
//! One endpoint backs the combined dashboard: the nutrition/workout
//! bucket for the selected date plus exercise progress trends. With an
//! exercise filter the full chronological series for that exercise is
//! returned; without one, the most recent records grouped by exercise
//! name.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::constants::limits;
use crate::errors::AppError;
use crate::models::ExerciseProgress;
use crate::resources::ServerResources;
use crate::services::daily_log;

/// Query parameters for the progress dashboard
#[derive(Debug, Deserialize)]
struct ProgressQuery {
    user_id: i64,
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    exercise_id: Option<i64>,
}

/// Progress dashboard routes
pub struct ProgressRoutes;

impl ProgressRoutes {
    /// Create all progress routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/progress", get(Self::handle_dashboard))
            .with_state(resources)
    }

    /// Combined dashboard: daily bucket plus progress trends
    async fn handle_dashboard(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ProgressQuery>,
    ) -> Result<Response, AppError> {
        let database = &resources.database;

        database
            .get_user(query.user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up user: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("User {}", query.user_id)))?;

        let date = query.date.unwrap_or_else(|| chrono::Local::now().date_naive());

        let log = daily_log::view_daily_log(database, query.user_id, date).await?;

        let workouts = database
            .workouts_for_daily_log(log.id)
            .await
            .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        let meals = database
            .meals_for_daily_log(log.id)
            .await
            .map_err(|e| AppError::database(format!("Failed to list meals: {e}")))?;

        // Grouped by exercise name; BTreeMap keeps the rendering stable
        let mut grouped: BTreeMap<String, Vec<ExerciseProgress>> = BTreeMap::new();

        if let Some(exercise_id) = query.exercise_id {
            let exercise = database
                .get_exercise(exercise_id)
                .await
                .map_err(|e| AppError::database(format!("Failed to look up exercise: {e}")))?
                .ok_or_else(|| AppError::not_found(format!("Exercise {exercise_id}")))?;

            let series = database
                .progress_series(query.user_id, exercise_id)
                .await
                .map_err(|e| AppError::database(format!("Failed to load progress: {e}")))?;

            grouped.insert(exercise.name, series);
        } else {
            let recent = database
                .recent_progress(query.user_id, limits::PROGRESS_RECORDS)
                .await
                .map_err(|e| AppError::database(format!("Failed to load progress: {e}")))?;

            for record in recent {
                grouped
                    .entry(record.exercise_name.clone())
                    .or_default()
                    .push(record);
            }
        }

        let exercises = database
            .progress_exercises(query.user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to list exercises: {e}")))?
            .into_iter()
            .map(|(id, name)| serde_json::json!({ "id": id, "name": name }))
            .collect::<Vec<_>>();

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "selected_date": date,
                "daily_log": log,
                "workouts": workouts,
                "meals": meals,
                "grouped_progress": grouped,
                "all_exercises": exercises,
                "selected_exercise_id": query.exercise_id,
            })),
        )
            .into_response())
    }
}
