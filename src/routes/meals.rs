// ABOUTME: Meal deletion route handlers
// ABOUTME: Delete-with-daily-log-detach and nutrition total refresh
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Meal routes
//!
//! Deleting a meal detaches it from its daily log (refreshing the
//! nutrition totals) before removing the record.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::delete,
    Router,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::daily_log;

/// Query parameters identifying the requesting user
#[derive(Debug, Deserialize)]
struct UserQuery {
    user_id: i64,
}

/// Meal routes
pub struct MealRoutes;

impl MealRoutes {
    /// Create all meal routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/meals/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Delete a meal, detaching it from its daily log first
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(meal_id): Path<i64>,
        Query(query): Query<UserQuery>,
    ) -> Result<Response, AppError> {
        let meal = resources
            .database
            .get_meal(meal_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up meal: {e}")))?
            .filter(|m| m.user_id == query.user_id)
            .ok_or_else(|| AppError::not_found(format!("Meal {meal_id}")))?;

        daily_log::detach_meal(&resources.database, query.user_id, &meal).await?;

        resources
            .database
            .delete_meal(meal_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete meal: {e}")))?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
