// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, fixture and router creation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `liftlog`
//!
//! This module provides common test setup functions to reduce
//! duplication across integration tests.

use std::sync::{Arc, Once};
use std::time::Duration;

use anyhow::Result;
use liftlog::{
    agent::AgentClient,
    config::environment::{AgentConfig, DatabaseConfig, Environment, ServerConfig},
    database::Database,
    models::{Exercise, User},
    resources::ServerResources,
};
use url::Url;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; default to WARN for quiet tests
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Agent configuration pointing at unroutable local endpoints
///
/// Suitable for tests that never dispatch, or that want a fast
/// connection failure.
pub fn test_agent_config() -> AgentConfig {
    AgentConfig {
        workout_agent_url: Url::parse("http://127.0.0.1:9/webhook/workout-agent").unwrap(),
        meal_agent_url: Url::parse("http://127.0.0.1:9/webhook/meal-agent").unwrap(),
        callback_base_url: Url::parse("http://127.0.0.1:8081").unwrap(),
        request_timeout: Duration::from_secs(1),
    }
}

/// Server configuration for router tests
pub fn test_server_config(agent: AgentConfig) -> ServerConfig {
    ServerConfig {
        http_port: 0,
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: "sqlite::memory:".into(),
        },
        agent,
    }
}

/// Build the full application router over a test database
pub fn build_test_router(database: Database, agent: AgentConfig) -> axum::Router {
    let agent_client = AgentClient::new(agent.clone()).unwrap();
    let resources = Arc::new(ServerResources::new(
        database,
        agent_client,
        test_server_config(agent),
    ));
    liftlog::routes::router(resources)
}

/// Create a test user
pub async fn seed_user(database: &Database, username: &str) -> Result<User> {
    database.create_user(username, Some("Test User")).await
}

/// Create an exercise with its catalog rows
pub async fn seed_exercise(database: &Database, name: &str) -> Result<Exercise> {
    let group = database.get_or_create_muscle_group("Chest").await?;
    let equipment = database.get_or_create_equipment("Barbell").await?;
    database.create_exercise(name, group.id, equipment.id).await
}

/// A well-formed single-line workout payload
pub fn workout_payload(user_id: i64, exercise_id: i64) -> serde_json::Value {
    serde_json::json!({
        "user_id": user_id,
        "name": "Push Day",
        "date": "2025-06-01",
        "notes": "felt strong",
        "exercises": [
            {
                "exercise_id": exercise_id,
                "sets": 3,
                "reps": 8,
                "weight": 100.0,
                "rest_seconds": 120,
                "order": 0
            }
        ]
    })
}

/// A well-formed meal payload
pub fn meal_payload(user_id: i64) -> serde_json::Value {
    serde_json::json!({
        "user_id": user_id,
        "name": "Chicken and rice",
        "calories": 650,
        "protein": 45,
        "carbs": 70,
        "fats": 12,
        "date": "2025-06-01"
    })
}
