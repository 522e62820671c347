// ABOUTME: Multi-turn conversation driver over the assistant-thread API
// ABOUTME: Polls runs to terminal status and dispatches in-band function calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Conversation driver
//!
//! [`ConversationDriver::continue_conversation`] implements the full
//! exchange: create or reuse a thread, append the user message, start a
//! run, poll until terminal, and when the run stops at `requires_action`
//! dispatch the assistant's function call to a local [`ToolHandler`] before
//! re-running. Vendor-side terminal failures are reported in-band as
//! fallback assistant text so callers always get a message and a thread id.

use crate::database::{PropertyFilter, PropertyManager};
use crate::errors::{AppError, AppResult};
use crate::llm::client::AssistantClient;
use crate::llm::types::{FunctionCallRequest, MessageRole, RunStatus};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Tool name the assistant uses to search the inventory
pub const FETCH_PROPERTIES_TOOL: &str = "fetch_properties";

// ============================================================================
// Tool Dispatch
// ============================================================================

/// Dispatch seam for the assistant's in-band function calls
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the named tool and return its JSON result
    async fn execute(&self, name: &str, arguments: &Value) -> AppResult<Value>;
}

/// Production tool handler backed by the property inventory
pub struct PropertySearchHandler {
    properties: PropertyManager,
}

impl PropertySearchHandler {
    /// Create a handler over the given property manager
    #[must_use]
    pub const fn new(properties: PropertyManager) -> Self {
        Self { properties }
    }
}

#[async_trait]
impl ToolHandler for PropertySearchHandler {
    async fn execute(&self, name: &str, arguments: &Value) -> AppResult<Value> {
        if name != FETCH_PROPERTIES_TOOL {
            return Err(AppError::invalid_input(format!("Unknown tool: {name}")));
        }

        let filter = match arguments.get("filter_params") {
            Some(params) => serde_json::from_value::<PropertyFilter>(params.clone())
                .map_err(|e| AppError::invalid_input(format!("Invalid filter_params: {e}")))?,
            None => PropertyFilter::default(),
        };

        let listings = self.properties.fetch_properties(&filter).await?;
        info!("Tool {name} matched {} properties", listings.len());

        serde_json::to_value(listings)
            .map_err(|e| AppError::internal(format!("Failed to serialize tool result: {e}")))
    }
}

// ============================================================================
// Conversation Driver
// ============================================================================

/// Result of one conversation exchange
#[derive(Debug, Clone)]
pub struct ConversationOutcome {
    /// Final assistant text (or an in-band fallback for failed runs)
    pub assistant_message: String,
    /// Remote thread id, newly created when the caller had none
    pub thread_id: String,
}

/// Drives a conversation exchange against the assistant API
pub struct ConversationDriver<'a> {
    client: &'a AssistantClient,
    tools: &'a dyn ToolHandler,
}

impl<'a> ConversationDriver<'a> {
    /// Create a driver over an API client and a tool handler
    #[must_use]
    pub const fn new(client: &'a AssistantClient, tools: &'a dyn ToolHandler) -> Self {
        Self { client, tools }
    }

    /// Continue (or start) a conversation with the assistant
    ///
    /// # Errors
    ///
    /// Returns an error if an API call fails outright or the run never
    /// reaches a terminal status within the configured poll bound. Vendor
    /// terminal failures (failed/incomplete runs) are NOT errors; they are
    /// reported as fallback assistant text.
    pub async fn continue_conversation(
        &self,
        user_input: &str,
        thread_id: Option<&str>,
        system_msg: Option<&str>,
    ) -> AppResult<ConversationOutcome> {
        // 1) Create or reuse the conversation thread
        let thread_id = match thread_id {
            Some(existing) => {
                debug!("Reusing existing thread {existing}");
                existing.to_owned()
            }
            None => {
                let thread = self.client.create_thread().await?;
                info!("Created new thread {}", thread.id);
                if let Some(msg) = system_msg {
                    self.client
                        .add_message(&thread.id, MessageRole::System, msg)
                        .await?;
                }
                thread.id
            }
        };

        // 2) Add the user's message to the thread
        self.client
            .add_message(&thread_id, MessageRole::User, user_input)
            .await?;

        // 3) Start a run and poll it to a terminal status
        let run = self.client.create_run(&thread_id).await?;
        debug!("Created run {} on thread {thread_id}", run.id);
        let status = self.poll_run(&thread_id, &run.id).await?;

        // 4) requires_action => the assistant may want a function call
        if status == RunStatus::RequiresAction {
            if let Some(text) = self.run_function_call_turn(&thread_id).await? {
                return Ok(ConversationOutcome {
                    assistant_message: text,
                    thread_id,
                });
            }
        }

        // 5) Terminal handling for everything else
        let assistant_message = self.terminal_message(status, &thread_id).await?;
        Ok(ConversationOutcome {
            assistant_message,
            thread_id,
        })
    }

    /// Poll a run until it reaches a terminal status
    async fn poll_run(&self, thread_id: &str, run_id: &str) -> AppResult<RunStatus> {
        let config = self.client.config();
        let interval = Duration::from_millis(config.poll_interval_ms);

        for _ in 0..config.max_poll_attempts {
            let run = self.client.get_run(thread_id, run_id).await?;
            if run.status.is_terminal() {
                debug!("Run {run_id} reached terminal status {}", run.status);
                return Ok(run.status);
            }
            sleep(interval).await;
        }

        Err(AppError::external_api(format!(
            "Run {run_id} did not reach a terminal status within {} polls",
            config.max_poll_attempts
        )))
    }

    /// Handle a `requires_action` stop: parse and dispatch the function call
    ///
    /// Returns the final assistant text when the dispatch round-trip
    /// completes. Returns `None` when no parseable call is present, the
    /// tool fails, or the follow-up run does not complete; callers fall
    /// back to terminal-status handling.
    async fn run_function_call_turn(&self, thread_id: &str) -> AppResult<Option<String>> {
        let messages = self.client.list_messages(thread_id).await?;

        let Some(call) = messages
            .iter()
            .find(|m| m.role == MessageRole::Assistant)
            .and_then(|m| m.text())
            .and_then(FunctionCallRequest::parse)
        else {
            warn!("Run requires action but no parseable function call found");
            return Ok(None);
        };

        info!("Dispatching function call: {}", call.name);
        let result = match self.tools.execute(&call.name, &call.arguments).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Function call {} failed: {e}", call.name);
                return Ok(None);
            }
        };

        // Feed the tool result back into the thread. The threads API does
        // not accept a dedicated tool role here, so the result goes in as
        // assistant content for the follow-up run to incorporate.
        let payload = result.to_string();
        self.client
            .add_message(thread_id, MessageRole::Assistant, &payload)
            .await?;

        let rerun = self.client.create_run(thread_id).await?;
        debug!("Created follow-up run {} on thread {thread_id}", rerun.id);
        let status = self.poll_run(thread_id, &rerun.id).await?;

        if status == RunStatus::Completed {
            return self.latest_assistant_text(thread_id).await;
        }

        warn!("Follow-up run ended with status {status}");
        Ok(None)
    }

    /// Produce the final assistant message for a terminal run status
    async fn terminal_message(&self, status: RunStatus, thread_id: &str) -> AppResult<String> {
        match status {
            RunStatus::Completed => Ok(self
                .latest_assistant_text(thread_id)
                .await?
                .unwrap_or_else(|| "No assistant response found.".to_owned())),
            RunStatus::Failed => {
                Ok("Run ended with status: failed. The model encountered an error.".to_owned())
            }
            RunStatus::Incomplete => {
                Ok("Run ended with status: incomplete. Possibly waiting for more info.".to_owned())
            }
            other => Ok(format!(
                "Run ended with status: {other}, no final message produced."
            )),
        }
    }

    /// Text of the newest assistant message, if any
    async fn latest_assistant_text(&self, thread_id: &str) -> AppResult<Option<String>> {
        let messages = self.client.list_messages(thread_id).await?;
        Ok(messages
            .iter()
            .find(|m| m.role == MessageRole::Assistant)
            .and_then(|m| m.text())
            .map(ToOwned::to_owned))
    }
}
