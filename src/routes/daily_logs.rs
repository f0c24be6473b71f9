// ABOUTME: Daily log view route handlers
// ABOUTME: Lazily creates and returns the per-day bucket with its records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Daily log routes
//!
//! Viewing a date lazily creates its bucket, matching the behavior of
//! logging a record for that date.

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

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::daily_log;

/// Query parameters for the daily log view
#[derive(Debug, Deserialize)]
struct DailyLogQuery {
    user_id: i64,
    #[serde(default)]
    date: Option<NaiveDate>,
}

/// Daily log routes
pub struct DailyLogRoutes;

impl DailyLogRoutes {
    /// Create all daily log routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/daily-log", get(Self::handle_view))
            .with_state(resources)
    }

    /// Get or lazily create the bucket for a date and return its records
    async fn handle_view(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<DailyLogQuery>,
    ) -> Result<Response, AppError> {
        resources
            .database
            .get_user(query.user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up user: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("User {}", query.user_id)))?;

        let date = query.date.unwrap_or_else(|| chrono::Local::now().date_naive());

        let log = daily_log::view_daily_log(&resources.database, query.user_id, date).await?;

        let workouts = resources
            .database
            .workouts_for_daily_log(log.id)
            .await
            .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        let meals = resources
            .database
            .meals_for_daily_log(log.id)
            .await
            .map_err(|e| AppError::database(format!("Failed to list meals: {e}")))?;

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "daily_log": log,
                "workouts": workouts,
                "meals": meals,
            })),
        )
            .into_response())
    }
}
