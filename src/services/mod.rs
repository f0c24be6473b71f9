// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Provides the aggregation engine, daily-log assembler and staging workflow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Domain service layer
//!
//! This module contains the business logic of the tracker, extracted from
//! route handlers so every entry point (agent callbacks, staged-workout
//! finalize, manual API calls) applies the same rules.

/// Aggregation engine: folds logged workouts into the progress ledger
pub mod aggregation;

/// Daily-log assembler: buckets workouts and meals by calendar day
pub mod daily_log;

/// Validated intake of agent payloads into persisted records
pub mod intake;

/// Staged-workout workflow: stage, inspect, finalize, discard
pub mod staging;
