// ABOUTME: Agent trigger and callback route handlers
// ABOUTME: Forwards free-text input to the agent and ingests its structured results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Agent trigger and callback routes
//!
//! `POST /api/trigger-agent` forwards free-text input to the external
//! automation agent. The agent answers asynchronously by posting a
//! structured payload to one of the callback endpoints: workouts are
//! staged for user confirmation, meals are persisted directly.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{AppError, ErrorCode};
use crate::payloads::MealPayload;
use crate::resources::ServerResources;
use crate::services::{intake, staging};

/// Request body for the trigger endpoint
#[derive(Debug, Deserialize)]
struct TriggerRequest {
    #[serde(default)]
    input: String,
    user_id: Option<i64>,
    #[serde(default)]
    date: Option<NaiveDate>,
}

/// Agent trigger and callback routes
pub struct AgentRoutes;

impl AgentRoutes {
    /// Create all agent routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/trigger-agent", post(Self::handle_trigger))
            .route(
                "/api/create-workout-from-agent",
                post(Self::handle_workout_callback),
            )
            .route(
                "/api/create-meal-from-agent",
                post(Self::handle_meal_callback),
            )
            .with_state(resources)
    }

    /// Classify free-text input and forward it to the matching agent
    async fn handle_trigger(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<TriggerRequest>,
    ) -> Result<Response, AppError> {
        if request.input.trim().is_empty() {
            return Err(AppError::new(
                ErrorCode::MissingRequiredField,
                "Input is required",
            ));
        }

        let Some(user_id) = request.user_id else {
            return Err(AppError::new(
                ErrorCode::MissingRequiredField,
                "user_id is required",
            ));
        };

        resources
            .database
            .get_user(user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up user: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")))?;

        let date = request
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let receipt = resources
            .agent_client
            .dispatch(&request.input, user_id, date)
            .await?;

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "message": format!("{} agent triggered successfully", receipt.agent_type),
                "agent_type": receipt.agent_type,
                "agent_status": receipt.agent_status,
            })),
        )
            .into_response())
    }

    /// Receive a structured workout from the agent and stage it
    async fn handle_workout_callback(
        State(resources): State<Arc<ServerResources>>,
        Json(payload): Json<Value>,
    ) -> Result<Response, AppError> {
        let staged = staging::stage(&resources.database, &payload).await?;

        Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Workout staged for confirmation",
                "staged_workout": staged.payload,
            })),
        )
            .into_response())
    }

    /// Receive a structured meal from the agent and persist it
    async fn handle_meal_callback(
        State(resources): State<Arc<ServerResources>>,
        Json(payload): Json<Value>,
    ) -> Result<Response, AppError> {
        let parsed: MealPayload = serde_json::from_value(payload)
            .map_err(|e| AppError::invalid_input(format!("Malformed meal payload: {e}")))?;

        let meal = intake::persist_meal(&resources.database, &parsed).await?;

        Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Meal created successfully",
                "meal": meal,
            })),
        )
            .into_response())
    }
}
