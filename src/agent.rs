// ABOUTME: Outbound dispatch to the external workout/meal automation agent
// ABOUTME: Classifies free-text input and forwards it with a callback URL

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Client for the external automation agent.
//!
//! The agent is a black box that turns free-text input ("bench pressed
//! 3x8 at 100kg") into a structured workout or meal payload and posts it
//! back to this server's callback endpoints. This module only handles
//! the outbound leg: classifying the input by keyword, building the
//! callback URL, and making a single bounded POST. Timeouts and
//! connection failures surface as external-service errors with no
//! retries and no database mutation.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use crate::config::environment::AgentConfig;
use crate::constants::keywords;
use crate::errors::{AppError, AppResult};

/// Classification of a free-text input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    /// Routed to the workout agent (also the default)
    Workout,
    /// Routed to the meal agent
    Meal,
}

impl AgentKind {
    /// Wire name used in responses and callback URLs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Meal => "meal",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body forwarded to the agent
#[derive(Debug, Serialize)]
struct AgentRequest<'a> {
    input: &'a str,
    user_id: i64,
    date: NaiveDate,
    callback_url: String,
}

/// Result of a successful dispatch
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReceipt {
    /// Which agent the input was routed to
    pub agent_type: String,
    /// HTTP status returned by the agent endpoint
    pub agent_status: u16,
}

/// Client for the external automation agent endpoints
#[derive(Clone)]
pub struct AgentClient {
    http: Client,
    config: AgentConfig,
}

impl AgentClient {
    /// Build a client from the agent configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: AgentConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Classify free-text input as meal- or workout-shaped.
    ///
    /// Any meal keyword routes to the meal agent; everything else falls
    /// through to the workout agent.
    #[must_use]
    pub fn classify(input: &str) -> AgentKind {
        let lowered = input.to_lowercase();
        if keywords::MEAL.iter().any(|word| lowered.contains(word)) {
            AgentKind::Meal
        } else {
            AgentKind::Workout
        }
    }

    /// Target endpoint for an agent kind
    fn target_url(&self, kind: AgentKind) -> &Url {
        match kind {
            AgentKind::Workout => &self.config.workout_agent_url,
            AgentKind::Meal => &self.config.meal_agent_url,
        }
    }

    /// Callback URL the agent should post its structured result to
    fn callback_url(&self, kind: AgentKind) -> AppResult<Url> {
        self.config
            .callback_base_url
            .join(&format!("api/create-{kind}-from-agent"))
            .map_err(|e| AppError::config(format!("Invalid callback base URL: {e}")))
    }

    /// Forward input to the matching agent endpoint.
    ///
    /// One attempt, bounded by the configured timeout. The triggering
    /// operation performs no database mutation, so a failure here leaves
    /// no partial state behind.
    ///
    /// # Errors
    ///
    /// Returns an external-timeout error when the agent does not respond
    /// within the window, and an external-service error for connection
    /// failures or non-success responses.
    pub async fn dispatch(
        &self,
        input: &str,
        user_id: i64,
        date: NaiveDate,
    ) -> AppResult<DispatchReceipt> {
        let kind = Self::classify(input);
        let target = self.target_url(kind).clone();
        let callback_url = self.callback_url(kind)?;

        info!(%kind, user_id, %target, "Dispatching input to agent");

        let request = AgentRequest {
            input,
            user_id,
            date,
            callback_url: callback_url.into(),
        };

        let response = self
            .http
            .post(target)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(%kind, "Agent dispatch failed: {e}");
                if e.is_timeout() {
                    AppError::external_timeout(format!("{kind} agent"))
                } else {
                    AppError::external_service(format!("{kind} agent"), e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(
                AppError::external_service(
                    format!("{kind} agent"),
                    format!("returned status {status}"),
                )
                .with_details(serde_json::json!({ "response": body })),
            );
        }

        Ok(DispatchReceipt {
            agent_type: kind.as_str().into(),
            agent_status: status.as_u16(),
        })
    }
}
