// ABOUTME: Environment-based server configuration loading and validation
// ABOUTME: Parses HTTP, database, CORS, and assistant API settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Server configuration loaded from environment variables
//!
//! | Variable | Default | Purpose |
//! |---|---|---|
//! | `HTTP_PORT` | `8080` | Listen port |
//! | `DATABASE_URL` | `sqlite:./rentora.db` | SQLite database |
//! | `CORS_ALLOWED_ORIGINS` | *(empty = permissive)* | Comma-separated origins |
//! | `OPENAI_API_KEY` | *(required)* | Assistant API key |
//! | `OPENAI_ASSISTANT_ID` | *(required)* | Assistant to run |
//! | `ASSISTANT_BASE_URL` | `https://api.openai.com/v1` | API base URL |
//! | `ASSISTANT_POLL_INTERVAL_MS` | `1000` | Run-status poll interval |
//! | `ASSISTANT_MAX_POLL_ATTEMPTS` | `120` | Poll bound before timeout |

use crate::errors::{AppError, AppResult};
use std::env;
use std::str::FromStr;

/// Default assistant API base URL
const DEFAULT_ASSISTANT_BASE_URL: &str = "https://api.openai.com/v1";

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Database connection URL
    pub database_url: String,
    /// Allowed CORS origins; empty means permissive
    pub cors_allowed_origins: Vec<String>,
    /// Assistant API settings
    pub assistant: AssistantConfig,
}

/// Assistant-thread API configuration
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// API key for the assistant service
    pub api_key: String,
    /// Identifier of the configured assistant
    pub assistant_id: String,
    /// Base URL of the assistant API
    pub base_url: String,
    /// Interval between run-status polls, in milliseconds
    pub poll_interval_ms: u64,
    /// Maximum polls before a run is considered timed out
    pub max_poll_attempts: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a numeric
    /// variable fails to parse.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            http_port: env_parsed("HTTP_PORT", 8080)?,
            database_url: env_or("DATABASE_URL", "sqlite:./rentora.db"),
            cors_allowed_origins: env_list("CORS_ALLOWED_ORIGINS"),
            assistant: AssistantConfig::from_env()?,
        })
    }
}

impl AssistantConfig {
    /// Load assistant settings from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENAI_API_KEY` or `OPENAI_ASSISTANT_ID` is
    /// missing, or a numeric variable fails to parse.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            api_key: env_required("OPENAI_API_KEY")?,
            assistant_id: env_required("OPENAI_ASSISTANT_ID")?,
            base_url: env_or("ASSISTANT_BASE_URL", DEFAULT_ASSISTANT_BASE_URL),
            poll_interval_ms: env_parsed("ASSISTANT_POLL_INTERVAL_MS", 1000)?,
            max_poll_attempts: env_parsed("ASSISTANT_MAX_POLL_ATTEMPTS", 120)?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_required(key: &str) -> AppResult<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::config(format!("{key} environment variable not set")))
}

fn env_list(key: &str) -> Vec<String> {
    env::var(key)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn env_parsed<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("{key} is not a valid number: {raw}"))),
        Err(_) => Ok(default),
    }
}
