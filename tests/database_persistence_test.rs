// ABOUTME: Integration tests for file-backed database persistence
// ABOUTME: Validates reopening a database and idempotent migrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use liftlog::database::Database;

#[tokio::test]
async fn test_data_survives_reopen_and_remigration() {
    common::init_test_logging();

    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}/liftlog.db", dir.path().display());

    let user_id;
    let exercise_id;
    {
        let database = Database::new(&url).await.unwrap();
        let user = common::seed_user(&database, "steven").await.unwrap();
        let exercise = common::seed_exercise(&database, "Barbell Bench Press")
            .await
            .unwrap();
        user_id = user.id;
        exercise_id = exercise.id;
    }

    // Reopen: migrations run again and must be harmless
    let database = Database::new(&url).await.unwrap();

    let user = database.get_user(user_id).await.unwrap().unwrap();
    assert_eq!(user.username, "steven");

    let exercise = database.get_exercise(exercise_id).await.unwrap().unwrap();
    assert_eq!(exercise.name, "Barbell Bench Press");

    let catalog = database.list_exercises().await.unwrap();
    assert_eq!(catalog.len(), 1);
}
