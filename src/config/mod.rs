// ABOUTME: Configuration module organization for Rentora Server
// ABOUTME: Re-exports the environment-backed server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Configuration management
//!
//! Configuration is environment-only; there is no config file format.

/// Environment variable parsing into typed configuration
pub mod environment;

pub use environment::{AssistantConfig, ServerConfig};
