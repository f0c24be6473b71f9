// ABOUTME: Staged workout route handlers for the confirmation workflow
// ABOUTME: View, finalize and discard transitions on the per-user slot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Staged workout confirmation routes
//!
//! An agent-proposed workout waits in a single per-user slot until the
//! user confirms (finalize) or rejects (discard) it. Viewing the slot is
//! side-effect-free.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::staging;

/// Query parameters identifying the slot owner
#[derive(Debug, Deserialize)]
struct UserQuery {
    user_id: i64,
}

/// Request body identifying the slot owner
#[derive(Debug, Deserialize)]
struct UserRequest {
    user_id: i64,
}

/// Staged workout routes
pub struct StagingRoutes;

impl StagingRoutes {
    /// Create all staged workout routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/staged-workout", get(Self::handle_view))
            .route("/api/staged-workout/finalize", post(Self::handle_finalize))
            .route("/api/staged-workout/discard", post(Self::handle_discard))
            .with_state(resources)
    }

    /// Read the live slot without transitioning state
    async fn handle_view(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<UserQuery>,
    ) -> Result<Response, AppError> {
        let staged = staging::current(&resources.database, query.user_id).await?;

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "staged_workout": staged.map(|s| s.payload),
            })),
        )
            .into_response())
    }

    /// Confirm the slot: validate, persist, clear
    async fn handle_finalize(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<UserRequest>,
    ) -> Result<Response, AppError> {
        let workout = staging::finalize(&resources.database, request.user_id).await?;

        Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Workout created successfully",
                "workout": workout,
            })),
        )
            .into_response())
    }

    /// Drop the slot unconditionally
    async fn handle_discard(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<UserRequest>,
    ) -> Result<Response, AppError> {
        let discarded = staging::discard(&resources.database, request.user_id).await?;

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "discarded": discarded })),
        )
            .into_response())
    }
}
