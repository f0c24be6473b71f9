// ABOUTME: Server binary for the LiftLog fitness tracking backend
// ABOUTME: Resolves configuration, opens storage and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # LiftLog API Server Binary
//!
//! Starts the LiftLog HTTP API: workout/meal logging, progress
//! aggregation, daily logs and the agent staging workflow.

use anyhow::Result;
use clap::Parser;
use liftlog::{
    agent::AgentClient, config::environment::ServerConfig, database::Database, logging,
    resources::ServerResources, routes,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "liftlog-server")]
#[command(about = "LiftLog - workout and nutrition logging API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;

    // Apply CLI overrides
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting LiftLog API Server");
    info!("{}", config.summary());

    // Initialize database and run migrations
    let database = Database::new(&config.database.url).await?;
    info!("Database initialized successfully: {}", database.backend_info());

    // Build the agent client from the resolved configuration
    let agent_client = AgentClient::new(config.agent.clone())?;

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, agent_client, config));

    let app = routes::router(resources);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", http_port)).await?;
    info!("HTTP server listening on port {http_port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("LiftLog server shut down cleanly");

    Ok(())
}

/// Resolve when ctrl-c is received
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install ctrl-c handler: {e}");
    }
}
