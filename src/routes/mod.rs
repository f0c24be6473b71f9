// ABOUTME: Route module organization for LiftLog HTTP endpoints
// ABOUTME: Centralized route definitions organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Route module for the LiftLog server
//!
//! This module organizes all HTTP routes by domain. Each domain module
//! contains only route definitions and thin handler functions that
//! delegate to the service layer.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::resources::ServerResources;

/// Agent trigger and callback routes
pub mod agent;
/// Daily log view routes
pub mod daily_logs;
/// Exercise catalog routes
pub mod exercises;
/// Health check and system status routes
pub mod health;
/// Meal deletion routes
pub mod meals;
/// Progress dashboard routes
pub mod progress;
/// Staged workout confirmation routes
pub mod staging;
/// Workout query and deletion routes
pub mod workouts;

// Re-export route handlers for binaries and tests
/// Agent trigger and callback route handlers
pub use agent::AgentRoutes;
/// Daily log route handlers
pub use daily_logs::DailyLogRoutes;
/// Exercise catalog route handlers
pub use exercises::ExerciseRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Meal route handlers
pub use meals::MealRoutes;
/// Progress dashboard route handlers
pub use progress::ProgressRoutes;
/// Staged workout route handlers
pub use staging::StagingRoutes;
/// Workout route handlers
pub use workouts::WorkoutRoutes;

/// Build the full application router with shared middleware
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(AgentRoutes::routes(resources.clone()))
        .merge(StagingRoutes::routes(resources.clone()))
        .merge(WorkoutRoutes::routes(resources.clone()))
        .merge(MealRoutes::routes(resources.clone()))
        .merge(DailyLogRoutes::routes(resources.clone()))
        .merge(ProgressRoutes::routes(resources.clone()))
        .merge(ExerciseRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
