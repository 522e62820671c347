// ABOUTME: Chat route handlers for assistant conversation management
// ABOUTME: Drives the conversation loop and persists exchanges as local history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Chat routes
//!
//! `POST /chat` handles a single user message: the conversation driver runs
//! the assistant (possibly dispatching a property search mid-conversation)
//! and the exchange is recorded under the remote thread id. History is
//! served from the local store, not the vendor API.

use crate::{
    errors::AppError,
    llm::{get_rentora_system_prompt, ConversationDriver, MessageRole, PropertySearchHandler},
    resources::ServerResources,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's question or statement
    pub message: String,
    /// Existing thread ID for multi-turn conversations
    #[serde(default)]
    pub thread_id: Option<String>,
}

/// Response for a chat exchange
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The assistant's reply
    pub assistant_message: String,
    /// Thread ID to pass back on the next turn
    pub thread_id: String,
}

/// One message in the history listing
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryMessage {
    /// Message ID
    pub id: String,
    /// Role (system/user/assistant/tool)
    pub role: String,
    /// Message content
    pub content: String,
    /// Creation timestamp
    pub created_at: String,
}

/// Response for the history listing
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Remote thread ID the history belongs to
    pub thread_id: String,
    /// Messages in chronological order
    pub messages: Vec<HistoryMessage>,
}

// ============================================================================
// Chat Routes
// ============================================================================

/// Chat routes handler
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create all chat routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/chat", post(Self::chat))
            .route(
                "/api/chat/threads/:thread_id/messages",
                get(Self::get_history),
            )
            .with_state(resources)
    }

    /// Handle a single chat message and return the assistant response
    async fn chat(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ChatRequest>,
    ) -> Result<Response, AppError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AppError::invalid_input("No 'message' provided"));
        }

        let handler = PropertySearchHandler::new(resources.properties.clone());
        let driver = ConversationDriver::new(&resources.assistant, &handler);

        let outcome = driver
            .continue_conversation(
                message,
                request.thread_id.as_deref(),
                Some(get_rentora_system_prompt()),
            )
            .await?;

        info!("Chat exchange completed on thread {}", outcome.thread_id);

        // Record the exchange locally; history failures must not lose the
        // assistant's reply, so they are logged and swallowed.
        let persisted = Self::record_exchange(
            &resources,
            &outcome.thread_id,
            message,
            &outcome.assistant_message,
        )
        .await;
        if let Err(e) = persisted {
            warn!("Failed to persist chat history: {e}");
        }

        let response = ChatResponse {
            assistant_message: outcome.assistant_message,
            thread_id: outcome.thread_id,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Persist a user/assistant exchange under the remote thread id
    async fn record_exchange(
        resources: &Arc<ServerResources>,
        remote_thread_id: &str,
        user_message: &str,
        assistant_message: &str,
    ) -> Result<(), AppError> {
        let thread = resources
            .chat
            .get_or_create_thread(remote_thread_id, None)
            .await?;
        resources
            .chat
            .add_message(&thread.id, MessageRole::User, user_message)
            .await?;
        resources
            .chat
            .add_message(&thread.id, MessageRole::Assistant, assistant_message)
            .await?;
        Ok(())
    }

    /// Get locally persisted history for a remote thread
    async fn get_history(
        State(resources): State<Arc<ServerResources>>,
        Path(thread_id): Path<String>,
    ) -> Result<Response, AppError> {
        let thread = resources
            .chat
            .get_thread_by_remote_id(&thread_id)
            .await?
            .ok_or_else(|| AppError::not_found("Thread not found"))?;

        let messages = resources.chat.get_messages(&thread.id).await?;

        let response = HistoryResponse {
            thread_id,
            messages: messages
                .into_iter()
                .map(|m| HistoryMessage {
                    id: m.id,
                    role: m.role,
                    content: m.content,
                    created_at: m.created_at,
                })
                .collect(),
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
