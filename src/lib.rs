// ABOUTME: Main library entry point for the LiftLog fitness tracking backend
// ABOUTME: Provides workout/meal logging, progress aggregation and agent staging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy for the whole crate
#![deny(unsafe_code)]

//! # LiftLog
//!
//! A personal fitness and nutrition tracking backend. Users log workouts
//! (exercises, sets, reps, weight) and meals; the server folds each logged
//! set into longitudinal per-exercise progress records and buckets every
//! record into a per-day log. Free-text input is forwarded to an external
//! automation agent that calls back with structured workout or meal data;
//! agent-originated workouts are staged for user confirmation before they
//! enter the persistence pipeline.
//!
//! ## Architecture
//!
//! The server follows a modular architecture:
//! - **Models**: Common data structures for workouts, meals and progress
//! - **Database**: SQLite-backed storage with transactional get-or-create
//! - **Services**: Aggregation engine, daily-log assembler, staging workflow
//! - **Agent**: Outbound dispatch to the external workout/meal agent
//! - **Routes**: HTTP API surface (axum)
//! - **Config**: Environment-resolved configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use liftlog::config::environment::ServerConfig;
//! use liftlog::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     // Load configuration
//!     let config = ServerConfig::from_env()?;
//!     println!("LiftLog configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the binary crates (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access
// them.

/// Outbound dispatch to the external workout/meal automation agent
pub mod agent;

/// Configuration management and environment resolution
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// SQLite database management and per-domain storage operations
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// Per-line workout metric calculation (volume, Epley one-rep-max)
pub mod metrics;

/// Common data models for workouts, meals, progress and daily logs
pub mod models;

/// Agent callback payload schemas and field-level validation
pub mod payloads;

/// Centralized resource container for dependency injection
pub mod resources;

/// `HTTP` routes for agent callbacks, queries and staged-workout transitions
pub mod routes;

/// Domain service layer: aggregation engine, daily-log assembler, staging
pub mod services;
