// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Resolves environment variables into typed configuration structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Configuration module for the LiftLog server
//!
//! All deployment-specific values (ports, database location, external
//! agent endpoints, timeouts) are resolved once at process start from
//! environment variables into a [`ServerConfig`] that is injected into
//! every component. Nothing reads the environment after startup.

/// Environment and server configuration
pub mod environment;

// Re-export main configuration types from environment
pub use environment::{AgentConfig, DatabaseConfig, Environment, ServerConfig};
