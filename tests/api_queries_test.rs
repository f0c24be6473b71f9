// ABOUTME: Integration tests for query and deletion routes
// ABOUTME: Recent workouts, progress dashboard, daily log view and deletes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use liftlog::database::{Database, NewWorkout, NewWorkoutLine};
use liftlog::services::{aggregation, daily_log, intake};
use liftlog::payloads::WorkoutPayload;
use tower::ServiceExt;

async fn request(
    router: &Router,
    method: &str,
    uri: &str,
) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

async fn persist_workout_on(
    database: &Database,
    user_id: i64,
    exercise_id: i64,
    day: u32,
) -> i64 {
    let payload: WorkoutPayload = serde_json::from_value(serde_json::json!({
        "user_id": user_id,
        "name": format!("Session {day}"),
        "date": format!("2025-06-{day:02}"),
        "exercises": [
            {"exercise_id": exercise_id, "sets": 3, "reps": 8, "weight": 100.0, "order": 0}
        ]
    }))
    .unwrap();

    intake::persist_workout(database, &payload).await.unwrap().id
}

#[tokio::test]
async fn test_recent_workouts_returns_five_newest() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database, "steven").await.unwrap();
    let exercise = common::seed_exercise(&database, "Barbell Bench Press")
        .await
        .unwrap();
    let router = common::build_test_router(database.clone(), common::test_agent_config());

    for day in 1..=6 {
        persist_workout_on(&database, user.id, exercise.id, day).await;
    }

    let (status, body) = request(
        &router,
        "GET",
        &format!("/api/recent-workouts?user_id={}", user.id),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let workouts = body.as_array().unwrap();
    assert_eq!(workouts.len(), 5);
    // Newest first; the oldest session (day 1) fell off
    assert_eq!(workouts[0]["date"], "2025-06-06");
    assert_eq!(workouts[4]["date"], "2025-06-02");
}

#[tokio::test]
async fn test_recent_workouts_unknown_user_is_not_found() {
    let database = common::create_test_database().await.unwrap();
    let router = common::build_test_router(database, common::test_agent_config());

    let (status, body) = request(&router, "GET", "/api/recent-workouts?user_id=4242").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_progress_dashboard_filtered_by_exercise() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database, "steven").await.unwrap();
    let bench = common::seed_exercise(&database, "Barbell Bench Press")
        .await
        .unwrap();
    let squat = common::seed_exercise(&database, "Barbell Back Squat")
        .await
        .unwrap();
    let router = common::build_test_router(database.clone(), common::test_agent_config());

    for day in 1..=3 {
        persist_workout_on(&database, user.id, bench.id, day).await;
    }
    persist_workout_on(&database, user.id, squat.id, 1).await;

    let (status, body) = request(
        &router,
        "GET",
        &format!(
            "/api/progress?user_id={}&exercise_id={}&date=2025-06-01",
            user.id, bench.id
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    let grouped = body["grouped_progress"].as_object().unwrap();
    assert_eq!(grouped.len(), 1);
    let series = grouped["Barbell Bench Press"].as_array().unwrap();
    assert_eq!(series.len(), 3);
    // Chronological for the filtered view
    assert_eq!(series[0]["date"], "2025-06-01");
    assert_eq!(series[2]["date"], "2025-06-03");

    // Both exercises appear in the dropdown list
    assert_eq!(body["all_exercises"].as_array().unwrap().len(), 2);
    assert_eq!(body["selected_exercise_id"], bench.id);
}

#[tokio::test]
async fn test_progress_dashboard_unfiltered_groups_by_name() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database, "steven").await.unwrap();
    let bench = common::seed_exercise(&database, "Barbell Bench Press")
        .await
        .unwrap();
    let squat = common::seed_exercise(&database, "Barbell Back Squat")
        .await
        .unwrap();
    let router = common::build_test_router(database.clone(), common::test_agent_config());

    persist_workout_on(&database, user.id, bench.id, 1).await;
    persist_workout_on(&database, user.id, squat.id, 2).await;

    let (status, body) = request(
        &router,
        "GET",
        &format!("/api/progress?user_id={}&date=2025-06-01", user.id),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let grouped = body["grouped_progress"].as_object().unwrap();
    assert_eq!(grouped.len(), 2);
    assert!(grouped.contains_key("Barbell Bench Press"));
    assert!(grouped.contains_key("Barbell Back Squat"));

    // The daily bucket for the selected date rides along
    assert_eq!(body["selected_date"], "2025-06-01");
    assert_eq!(body["workouts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_progress_dashboard_unknown_exercise_is_not_found() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database, "steven").await.unwrap();
    let router = common::build_test_router(database, common::test_agent_config());

    let (status, _) = request(
        &router,
        "GET",
        &format!("/api/progress?user_id={}&exercise_id=4242", user.id),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_daily_log_view_creates_bucket_and_lists_records() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database, "steven").await.unwrap();
    let exercise = common::seed_exercise(&database, "Barbell Bench Press")
        .await
        .unwrap();
    let router = common::build_test_router(database.clone(), common::test_agent_config());

    persist_workout_on(&database, user.id, exercise.id, 1).await;

    let (status, body) = request(
        &router,
        "GET",
        &format!("/api/daily-log?user_id={}&date=2025-06-01", user.id),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["daily_log"]["date"], "2025-06-01");
    assert_eq!(body["workouts"].as_array().unwrap().len(), 1);
    assert_eq!(body["meals"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_workout_detaches_but_keeps_progress() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database, "steven").await.unwrap();
    let exercise = common::seed_exercise(&database, "Barbell Bench Press")
        .await
        .unwrap();
    let router = common::build_test_router(database.clone(), common::test_agent_config());

    let workout_id = persist_workout_on(&database, user.id, exercise.id, 1).await;

    let (status, _) = request(
        &router,
        "DELETE",
        &format!("/api/workouts/{workout_id}?user_id={}", user.id),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Detached from the daily log and gone from storage
    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let log = database.find_daily_log(user.id, date).await.unwrap().unwrap();
    assert!(database.workouts_for_daily_log(log.id).await.unwrap().is_empty());
    assert!(database.get_workout(workout_id).await.unwrap().is_none());

    // Progress rows are not retracted
    let series = database
        .progress_series(user.id, exercise.id)
        .await
        .unwrap();
    assert_eq!(series.len(), 1);
}

#[tokio::test]
async fn test_delete_workout_of_other_user_is_not_found() {
    let database = common::create_test_database().await.unwrap();
    let owner = common::seed_user(&database, "steven").await.unwrap();
    let other = common::seed_user(&database, "intruder").await.unwrap();
    let exercise = common::seed_exercise(&database, "Barbell Bench Press")
        .await
        .unwrap();
    let router = common::build_test_router(database.clone(), common::test_agent_config());

    let workout_id = persist_workout_on(&database, owner.id, exercise.id, 1).await;

    let (status, _) = request(
        &router,
        "DELETE",
        &format!("/api/workouts/{workout_id}?user_id={}", other.id),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(database.get_workout(workout_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_meal_refreshes_totals() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database, "steven").await.unwrap();
    let router = common::build_test_router(database.clone(), common::test_agent_config());

    let payload: liftlog::payloads::MealPayload =
        serde_json::from_value(common::meal_payload(user.id)).unwrap();
    let meal = intake::persist_meal(&database, &payload).await.unwrap();

    let (status, _) = request(
        &router,
        "DELETE",
        &format!("/api/meals/{}?user_id={}", meal.id, user.id),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let log = database.find_daily_log(user.id, date).await.unwrap().unwrap();
    assert_eq!(log.total_calories, 0);
    assert_eq!(log.total_protein, 0);
    assert!(database.get_meal(meal.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_exercise_catalog_listing() {
    let database = common::create_test_database().await.unwrap();
    common::seed_exercise(&database, "Barbell Bench Press")
        .await
        .unwrap();
    common::seed_exercise(&database, "Barbell Back Squat")
        .await
        .unwrap();
    let router = common::build_test_router(database, common::test_agent_config());

    let (status, body) = request(&router, "GET", "/api/exercises").await;

    assert_eq!(status, StatusCode::OK);
    let exercises = body.as_array().unwrap();
    assert_eq!(exercises.len(), 2);
    // Ordered by name
    assert_eq!(exercises[0]["name"], "Barbell Back Squat");
}

#[tokio::test]
async fn test_ingested_workout_is_attached_to_its_own_date() {
    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database, "steven").await.unwrap();
    let exercise = common::seed_exercise(&database, "Barbell Bench Press")
        .await
        .unwrap();

    // Direct service-level check that the pipeline buckets by workout date
    let workout = database
        .create_workout(&NewWorkout {
            user_id: user.id,
            name: "Backdated session".into(),
            date: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
            notes: String::new(),
            lines: vec![NewWorkoutLine {
                exercise_id: exercise.id,
                sets: 3,
                reps: 8,
                weight: Some(100.0),
                rest_seconds: None,
                notes: String::new(),
                order_index: 0,
            }],
        })
        .await
        .unwrap();

    aggregation::ingest_workout(&database, user.id, &workout)
        .await
        .unwrap();
    daily_log::attach_workout(&database, user.id, &workout)
        .await
        .unwrap();

    let log = database
        .find_daily_log(user.id, NaiveDate::from_ymd_opt(2025, 5, 20).unwrap())
        .await
        .unwrap()
        .unwrap();
    let linked = database.workouts_for_daily_log(log.id).await.unwrap();
    assert_eq!(linked.len(), 1);
}
