// ABOUTME: Integration tests for outbound agent dispatch
// ABOUTME: Validates classification routing, timeout and connection failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use liftlog::agent::AgentClient;
use liftlog::config::environment::AgentConfig;
use liftlog::errors::ErrorCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn agent_config(workout: SocketAddr, meal: SocketAddr, timeout: Duration) -> AgentConfig {
    AgentConfig {
        workout_agent_url: Url::parse(&format!("http://{workout}/webhook/workout-agent")).unwrap(),
        meal_agent_url: Url::parse(&format!("http://{meal}/webhook/meal-agent")).unwrap(),
        callback_base_url: Url::parse("http://127.0.0.1:8081").unwrap(),
        request_timeout: timeout,
    }
}

/// Stub agent endpoint: reads the request, answers 200, counts hits
async fn spawn_responding_server() -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_in_task = hits.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            hits_in_task.fetch_add(1, Ordering::SeqCst);

            let mut buf = vec![0_u8; 8192];
            // Read until the request body has arrived (small payloads
            // arrive quickly; stop on EOF or parse completion)
            let mut total = 0;
            loop {
                match stream.read(&mut buf[total..]).await {
                    Ok(0) => break,
                    Ok(n) => {
                        total += n;
                        let text = String::from_utf8_lossy(&buf[..total]);
                        if let Some(header_end) = text.find("\r\n\r\n") {
                            let content_length = text
                                .lines()
                                .find_map(|line| {
                                    line.to_lowercase()
                                        .strip_prefix("content-length:")
                                        .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                                })
                                .unwrap_or(0);
                            if total >= header_end + 4 + content_length {
                                break;
                            }
                        }
                    }
                    Err(_) => break,
                }
            }

            let body = r#"{"status":"accepted"}"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (addr, hits)
}

/// Stub agent endpoint that accepts connections and never responds
async fn spawn_hanging_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            // Keep the socket open without ever answering
            held.push(stream);
        }
    });

    addr
}

#[tokio::test]
async fn test_meal_input_is_routed_to_the_meal_agent() {
    let (workout_addr, workout_hits) = spawn_responding_server().await;
    let (meal_addr, meal_hits) = spawn_responding_server().await;

    let client = AgentClient::new(agent_config(
        workout_addr,
        meal_addr,
        Duration::from_secs(2),
    ))
    .unwrap();

    let receipt = client
        .dispatch("had chicken and rice for lunch", 1, date())
        .await
        .unwrap();

    assert_eq!(receipt.agent_type, "meal");
    assert_eq!(receipt.agent_status, 200);
    assert_eq!(meal_hits.load(Ordering::SeqCst), 1);
    assert_eq!(workout_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_workout_input_is_routed_to_the_workout_agent() {
    let (workout_addr, workout_hits) = spawn_responding_server().await;
    let (meal_addr, meal_hits) = spawn_responding_server().await;

    let client = AgentClient::new(agent_config(
        workout_addr,
        meal_addr,
        Duration::from_secs(2),
    ))
    .unwrap();

    let receipt = client
        .dispatch("bench press 3x8 at 100kg", 1, date())
        .await
        .unwrap();

    assert_eq!(receipt.agent_type, "workout");
    assert_eq!(workout_hits.load(Ordering::SeqCst), 1);
    assert_eq!(meal_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unresponsive_agent_surfaces_a_timeout_error() {
    let workout_addr = spawn_hanging_server().await;
    let meal_addr = spawn_hanging_server().await;

    let client = AgentClient::new(agent_config(
        workout_addr,
        meal_addr,
        Duration::from_millis(500),
    ))
    .unwrap();

    let error = client
        .dispatch("bench press 3x8 at 100kg", 1, date())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceTimeout);
}

#[tokio::test]
async fn test_unreachable_agent_surfaces_a_service_error() {
    // Nothing listens on the configured ports
    let client = AgentClient::new(common::test_agent_config()).unwrap();

    let error = client
        .dispatch("bench press 3x8 at 100kg", 1, date())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_trigger_timeout_performs_no_mutation() {
    let workout_addr = spawn_hanging_server().await;
    let meal_addr = spawn_hanging_server().await;

    let database = common::create_test_database().await.unwrap();
    let user = common::seed_user(&database, "steven").await.unwrap();
    let router = common::build_test_router(
        database.clone(),
        agent_config(workout_addr, meal_addr, Duration::from_millis(500)),
    );

    let body = serde_json::json!({
        "input": "bench press 3x8 at 100kg",
        "user_id": user.id,
        "date": "2025-06-01"
    });

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/trigger-agent")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

    // No partial state: nothing staged, nothing persisted, no bucket
    assert!(database.get_staged_workout(user.id).await.unwrap().is_none());
    assert!(database.recent_workouts(user.id, 5).await.unwrap().is_empty());
    assert!(database.find_daily_log(user.id, date()).await.unwrap().is_none());
}
