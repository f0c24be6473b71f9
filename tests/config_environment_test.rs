// ABOUTME: Integration tests for environment configuration resolution
// ABOUTME: Validates defaults, overrides and fail-fast on malformed values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use liftlog::config::environment::{Environment, ServerConfig};
use liftlog::errors::ErrorCode;
use serial_test::serial;

const VARS: &[&str] = &[
    "HTTP_PORT",
    "ENVIRONMENT",
    "DATABASE_URL",
    "WORKOUT_AGENT_URL",
    "MEAL_AGENT_URL",
    "CALLBACK_BASE_URL",
    "AGENT_REQUEST_TIMEOUT_SECS",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_bare_environment_yields_documented_defaults() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8081);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.database.url, "sqlite:./data/liftlog.db");
    assert_eq!(config.agent.request_timeout.as_secs(), 10);
    assert_eq!(
        config.agent.workout_agent_url.as_str(),
        "http://localhost:5678/webhook/workout-agent"
    );
    assert_eq!(
        config.agent.meal_agent_url.as_str(),
        "http://localhost:5678/webhook/meal-agent"
    );
}

#[test]
#[serial]
fn test_environment_overrides_apply() {
    clear_env();
    std::env::set_var("HTTP_PORT", "9090");
    std::env::set_var("ENVIRONMENT", "production");
    std::env::set_var("WORKOUT_AGENT_URL", "https://agents.example.com/workout");
    std::env::set_var("AGENT_REQUEST_TIMEOUT_SECS", "3");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 9090);
    assert!(config.environment.is_production());
    assert_eq!(
        config.agent.workout_agent_url.as_str(),
        "https://agents.example.com/workout"
    );
    assert_eq!(config.agent.request_timeout.as_secs(), 3);

    clear_env();
}

#[test]
#[serial]
fn test_malformed_port_fails_fast() {
    clear_env();
    std::env::set_var("HTTP_PORT", "not-a-port");

    let error = ServerConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);

    clear_env();
}

#[test]
#[serial]
fn test_malformed_agent_url_fails_fast() {
    clear_env();
    std::env::set_var("MEAL_AGENT_URL", "not a url at all");

    let error = ServerConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);

    clear_env();
}

#[test]
#[serial]
fn test_callback_base_defaults_to_local_http_port() {
    clear_env();
    std::env::set_var("HTTP_PORT", "9191");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.agent.callback_base_url.as_str(), "http://localhost:9191/");

    clear_env();
}
