// ABOUTME: Database management for LiftLog storage
// ABOUTME: Owns the SQLite pool, runs migrations and hosts per-domain operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Database Management
//!
//! This module provides database functionality for the LiftLog server:
//! user, catalog, workout and meal storage plus the derived
//! `exercise_progress` and `daily_logs` records.
//!
//! Every get-or-create-then-mutate sequence runs inside a single sqlx
//! transaction scoped to the natural unique key, so concurrent requests
//! for the same user can neither create duplicate rows nor interleave
//! read-modify-write cycles on the same record.

mod daily_logs;
mod exercises;
mod meals;
mod progress;
mod staged;
mod users;
mod workouts;

pub use meals::NewMeal;
pub use workouts::{NewWorkout, NewWorkoutLine};

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

/// Pool size for file-backed databases
const MAX_CONNECTIONS: u32 = 5;

/// Database manager for LiftLog storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration statement fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist and
        // enforces foreign keys on every pooled connection
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database exists per connection; a pool of them
        // would hand out empty databases
        let max_connections = if database_url.contains(":memory:") {
            1
        } else {
            MAX_CONNECTIONS
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let db = Self { pool };

        db.migrate().await?;

        Ok(db)
    }

    /// Run database migrations
    ///
    /// All statements are idempotent (`CREATE TABLE IF NOT EXISTS`), so
    /// this is safe to run on every startup.
    ///
    /// # Errors
    ///
    /// Returns an error if any migration statement fails.
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_exercises().await?;
        self.migrate_workouts().await?;
        self.migrate_meals().await?;
        self.migrate_progress().await?;
        self.migrate_daily_logs().await?;
        self.migrate_staged().await?;
        Ok(())
    }

    /// Backend description for startup logging
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        "SQLite"
    }
}
