// ABOUTME: Workout query and deletion route handlers
// ABOUTME: Recent workout listing and delete-with-daily-log-detach
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Workout routes
//!
//! Deleting a workout detaches it from its daily log first; progress
//! records are deliberately left in place (contributions are never
//! retracted).

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;

use crate::constants::limits;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::daily_log;

/// Query parameters identifying the requesting user
#[derive(Debug, Deserialize)]
struct UserQuery {
    user_id: i64,
}

/// Workout routes
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recent-workouts", get(Self::handle_recent))
            .route("/api/workouts/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// The five most-recently-dated workouts for a user
    async fn handle_recent(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<UserQuery>,
    ) -> Result<Response, AppError> {
        resources
            .database
            .get_user(query.user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up user: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("User {}", query.user_id)))?;

        let workouts = resources
            .database
            .recent_workouts(query.user_id, limits::RECENT_WORKOUTS)
            .await
            .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        Ok((StatusCode::OK, Json(workouts)).into_response())
    }

    /// Delete a workout, detaching it from its daily log first
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(workout_id): Path<i64>,
        Query(query): Query<UserQuery>,
    ) -> Result<Response, AppError> {
        let workout = resources
            .database
            .get_workout(workout_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up workout: {e}")))?
            .filter(|w| w.user_id == query.user_id)
            .ok_or_else(|| AppError::not_found(format!("Workout {workout_id}")))?;

        daily_log::detach_workout(&resources.database, query.user_id, &workout).await?;

        resources
            .database
            .delete_workout(workout_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout: {e}")))?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
