// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes and runtime parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Environment-based configuration management for production deployment

use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use url::Url;

/// Environment type for logging and behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database URL (e.g. `sqlite:./data/liftlog.db`)
    pub url: String,
}

/// External agent service configuration
///
/// The automation agent converts free-text input into structured workout
/// or meal payloads and posts them back to the callback endpoints.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Endpoint receiving workout-classified input
    pub workout_agent_url: Url,
    /// Endpoint receiving meal-classified input
    pub meal_agent_url: Url,
    /// Public base URL the agent calls back to
    pub callback_base_url: Url,
    /// Upper bound on a single outbound dispatch request
    pub request_timeout: Duration,
}

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the API server
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database settings
    pub database: DatabaseConfig,
    /// External agent settings
    pub agent: AgentConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Every variable has a documented default so a bare environment
    /// yields a working development configuration; malformed values fail
    /// fast with a configuration error.
    ///
    /// # Errors
    ///
    /// Returns a [`ErrorCode::ConfigError`](crate::errors::ErrorCode)
    /// error when a variable is present but unparseable (bad port number,
    /// malformed URL, non-numeric timeout).
    pub fn from_env() -> AppResult<Self> {
        let http_port = parse_var("HTTP_PORT", defaults::HTTP_PORT)?;

        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_default(),
        );

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DATABASE_URL.into()),
        };

        let agent = AgentConfig {
            workout_agent_url: parse_url_var(
                "WORKOUT_AGENT_URL",
                "http://localhost:5678/webhook/workout-agent",
            )?,
            meal_agent_url: parse_url_var(
                "MEAL_AGENT_URL",
                "http://localhost:5678/webhook/meal-agent",
            )?,
            callback_base_url: parse_url_var(
                "CALLBACK_BASE_URL",
                &format!("http://localhost:{http_port}"),
            )?,
            request_timeout: Duration::from_secs(parse_var(
                "AGENT_REQUEST_TIMEOUT_SECS",
                defaults::AGENT_REQUEST_TIMEOUT_SECS,
            )?),
        };

        Ok(Self {
            http_port,
            environment,
            database,
            agent,
        })
    }

    /// One-line startup summary for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "LiftLog Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Workout Agent: {}\n\
             - Meal Agent: {}\n\
             - Callback Base: {}\n\
             - Agent Timeout: {}s",
            self.http_port,
            self.environment,
            self.database.url,
            self.agent.workout_agent_url,
            self.agent.meal_agent_url,
            self.agent.callback_base_url,
            self.agent.request_timeout.as_secs(),
        )
    }
}

/// Read an environment variable and parse it, falling back to a default
fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("Invalid {key} value: {raw}"))),
        Err(_) => Ok(default),
    }
}

/// Read a URL-typed environment variable, falling back to a default
fn parse_url_var(key: &str, default: &str) -> AppResult<Url> {
    let raw = env::var(key).unwrap_or_else(|_| default.into());
    Url::parse(&raw).map_err(|e| AppError::config(format!("Invalid {key} value {raw}: {e}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("test"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("anything-else"),
            Environment::Development
        );
    }

    #[test]
    fn test_parse_var_default_applies() {
        // Key chosen to never exist in a test environment
        let port: u16 = parse_var("LIFTLOG_TEST_UNSET_PORT", 9099).unwrap();
        assert_eq!(port, 9099);
    }

    #[test]
    fn test_parse_url_var_rejects_malformed_default() {
        let err = parse_url_var("LIFTLOG_TEST_UNSET_URL", "not a url").unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::ConfigError);
    }
}
