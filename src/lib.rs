// ABOUTME: Main library entry point for the Rentora rental assistant backend
// ABOUTME: Provides REST API routes, LLM chat integration, and SQLite persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

#![deny(unsafe_code)]

//! # Rentora Server
//!
//! A property-rental chatbot backend. Users converse with an LLM-backed
//! assistant over a REST API; the assistant can invoke a local property
//! search mid-conversation, and leads plus chat history are persisted in
//! a relational store.
//!
//! ## Features
//!
//! - **Assistant chat**: multi-turn conversations driven through a stateful
//!   assistant-thread API with in-band function calling
//! - **Property search**: filter-based queries over the property inventory,
//!   available both as a REST endpoint and as an assistant tool
//! - **Lead management**: CRUD for rental prospects
//! - **Nexus tags**: batch derivation of secondary tag classifications from
//!   aggregate condition data
//!
//! ## Quick Start
//!
//! 1. Set `OPENAI_API_KEY` and `OPENAI_ASSISTANT_ID`
//! 2. Start the server with `rentora-server`
//! 3. POST to `/chat` with `{"message": "...", "thread_id": null}`
//!
//! ## Architecture
//!
//! - **Routes**: thin axum handlers organized by domain
//! - **Database**: SQLite via sqlx with migration support
//! - **LLM**: assistant-thread client and the conversation polling loop
//! - **Config**: environment-only configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use rentora_server::config::ServerConfig;
//! use rentora_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Rentora server configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Configuration management and environment parsing
pub mod config;

/// Database access layer with migration support
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// LLM assistant-thread integration and the conversation driver
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// Common data models for leads, properties, and chat history
pub mod models;

/// Shared dependency container for HTTP handlers
pub mod resources;

/// HTTP routes for chat, leads, properties, scheduling, and health
pub mod routes;
