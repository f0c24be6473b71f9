// ABOUTME: Application constants for defaults, query limits and agent keywords
// ABOUTME: Centralizes magic values so configuration and handlers stay aligned
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Application constants organized by domain.
//!
//! Hardcoded service addresses are deliberately absent; anything
//! deployment-specific is resolved through [`crate::config`].

/// Default values applied when the environment leaves a knob unset
pub mod defaults {
    /// Default HTTP port for the API server
    pub const HTTP_PORT: u16 = 8081;

    /// Default SQLite database URL
    pub const DATABASE_URL: &str = "sqlite:./data/liftlog.db";

    /// Timeout for outbound agent dispatch requests, in seconds
    pub const AGENT_REQUEST_TIMEOUT_SECS: u64 = 10;
}

/// Query result limits
pub mod limits {
    /// Number of workouts returned by the recent-workouts endpoint
    pub const RECENT_WORKOUTS: i64 = 5;

    /// Number of progress records returned by the unfiltered progress view
    pub const PROGRESS_RECORDS: i64 = 50;
}

/// Keyword lists used to classify free-text agent input
pub mod keywords {
    /// Inputs containing any of these are routed to the meal agent
    pub const MEAL: &[&str] = &[
        "meal",
        "calorie",
        "calories",
        "cals",
        "protein",
        "breakfast",
        "lunch",
        "dinner",
        "food",
        "snack",
    ];

    /// Nominal workout vocabulary; the workout agent is also the default
    /// route when no meal keyword matches
    pub const WORKOUT: &[&str] = &[
        "workout", "sets", "reps", "bench", "curl", "press", "squat",
    ];
}

/// Physiological formula constants
pub mod physiology {
    /// Divisor in the Epley one-rep-max estimate: `w * (1 + reps / 30)`
    pub const EPLEY_REP_DIVISOR: f64 = 30.0;
}

/// Service name identifiers for logging
pub mod service_names {
    /// Canonical service name used in structured log output
    pub const LIFTLOG_SERVER: &str = "liftlog-server";
}
