// ABOUTME: LLM assistant-thread integration module organization
// ABOUTME: Exposes the API client, conversation driver, and wire types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Assistant-thread LLM integration
//!
//! The assistant service exposes stateful conversation *threads*: messages
//! are appended to a thread and a *run* executes the assistant against it.
//! [`client::AssistantClient`] wraps the HTTP API;
//! [`conversation::ConversationDriver`] drives the poll-dispatch loop,
//! including the in-band function-call protocol.

/// HTTP client for the assistant-thread API
pub mod client;
/// Multi-turn conversation driver with tool dispatch
pub mod conversation;
/// System prompt definitions
pub mod prompts;
/// Wire types shared by the client and the driver
pub mod types;

pub use client::AssistantClient;
pub use conversation::{ConversationDriver, ConversationOutcome, PropertySearchHandler, ToolHandler};
pub use prompts::get_rentora_system_prompt;
pub use types::{FunctionCallRequest, MessageObject, MessageRole, RunObject, RunStatus, ThreadObject};
