// ABOUTME: HTTP client for the stateful assistant-thread API
// ABOUTME: Implements thread creation, message append, run start, and polling reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Assistant-thread API client
//!
//! Thin typed wrapper over the vendor's REST surface:
//!
//! - `POST   /threads` creates a conversation thread
//! - `POST   /threads/{id}/messages` appends a message
//! - `POST   /threads/{id}/runs` starts a run of the configured assistant
//! - `GET    /threads/{id}/runs/{run_id}` polls run status
//! - `GET    /threads/{id}/messages` lists messages, newest first

use crate::config::AssistantConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::types::{MessageList, MessageObject, MessageRole, RunObject, ThreadObject};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

/// Request timeout for individual API calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Beta header required by the threads API
const BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

/// Client for the assistant-thread API
#[derive(Clone)]
pub struct AssistantClient {
    http: Client,
    config: AssistantConfig,
}

impl AssistantClient {
    /// Create a client from explicit configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: AssistantConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Create a client from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing
    pub fn from_env() -> AppResult<Self> {
        Self::new(AssistantConfig::from_env()?)
    }

    /// Assistant configuration in use
    #[must_use]
    pub const fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Create a new conversation thread
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails
    pub async fn create_thread(&self) -> AppResult<ThreadObject> {
        let url = format!("{}/threads", self.config.base_url);
        self.send(self.http.post(url).json(&json!({}))).await
    }

    /// Append a message to a thread
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails
    pub async fn add_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> AppResult<MessageObject> {
        let url = format!("{}/threads/{thread_id}/messages", self.config.base_url);
        let body = json!({ "role": role.as_str(), "content": content });
        self.send(self.http.post(url).json(&body)).await
    }

    /// Start a run of the configured assistant on a thread
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails
    pub async fn create_run(&self, thread_id: &str) -> AppResult<RunObject> {
        let url = format!("{}/threads/{thread_id}/runs", self.config.base_url);
        let body = json!({ "assistant_id": self.config.assistant_id });
        self.send(self.http.post(url).json(&body)).await
    }

    /// Retrieve the current state of a run
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails
    pub async fn get_run(&self, thread_id: &str, run_id: &str) -> AppResult<RunObject> {
        let url = format!(
            "{}/threads/{thread_id}/runs/{run_id}",
            self.config.base_url
        );
        self.send(self.http.get(url)).await
    }

    /// List the messages of a thread, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails
    pub async fn list_messages(&self, thread_id: &str) -> AppResult<Vec<MessageObject>> {
        let url = format!("{}/threads/{thread_id}/messages", self.config.base_url);
        let list: MessageList = self.send(self.http.get(url)).await?;
        Ok(list.data)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = request
            .bearer_auth(&self.config.api_key)
            .header(BETA_HEADER.0, BETA_HEADER.1)
            .send()
            .await
            .map_err(|e| AppError::external_api(format!("Assistant API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_api(format!(
                "Assistant API returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::external_api(format!("Assistant API response malformed: {e}")))
    }
}
