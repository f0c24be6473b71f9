// ABOUTME: Centralized resource container for dependency injection
// ABOUTME: Shares the database, agent client and configuration across routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Server Resources Module
//!
//! Centralized resource container for dependency injection. Route
//! handlers receive one `Arc<ServerResources>` instead of re-creating
//! clients or cloning individual Arcs everywhere.

use std::sync::Arc;

use crate::agent::AgentClient;
use crate::config::environment::ServerConfig;
use crate::database::Database;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Shared database handle
    pub database: Arc<Database>,
    /// Shared client for the external automation agent
    pub agent_client: Arc<AgentClient>,
    /// Resolved server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, agent_client: AgentClient, config: ServerConfig) -> Self {
        Self {
            database: Arc::new(database),
            agent_client: Arc::new(agent_client),
            config: Arc::new(config),
        }
    }
}
