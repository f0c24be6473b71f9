// ABOUTME: Exercise catalog route handlers
// ABOUTME: Catalog listing for pickers and agent grounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Exercise catalog routes

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::errors::AppError;
use crate::resources::ServerResources;

/// Exercise catalog routes
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise catalog routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/exercises", get(Self::handle_list))
            .with_state(resources)
    }

    /// List the whole catalog, ordered by name
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let exercises = resources
            .database
            .list_exercises()
            .await
            .map_err(|e| AppError::database(format!("Failed to list exercises: {e}")))?;

        Ok((StatusCode::OK, Json(exercises)).into_response())
    }
}
