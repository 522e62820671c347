// ABOUTME: Wire types for the assistant-thread API and the function-call protocol
// ABOUTME: Defines message roles, run statuses, and response payload shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Roles and Run Status
// ============================================================================

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Conversation-level instructions
    System,
    /// End-user input
    User,
    /// Assistant output
    Assistant,
    /// Local tool output (persisted locally; sent upstream as `assistant`)
    Tool,
}

impl MessageRole {
    /// String representation used in the database and on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

/// Status of an assistant run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Accepted, not yet started
    Queued,
    /// Executing
    InProgress,
    /// Being cancelled
    Cancelling,
    /// Cancelled before completion
    Cancelled,
    /// Finished with a response
    Completed,
    /// Waiting on a tool/function result
    RequiresAction,
    /// The model encountered an error
    Failed,
    /// Stopped before producing a full response
    Incomplete,
    /// Timed out on the vendor side
    Expired,
    /// Any status this client does not recognize
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Whether polling should stop at this status
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed
                | Self::RequiresAction
                | Self::Failed
                | Self::Incomplete
                | Self::Cancelled
                | Self::Expired
        )
    }

    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::Cancelling => "cancelling",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::RequiresAction => "requires_action",
            Self::Failed => "failed",
            Self::Incomplete => "incomplete",
            Self::Expired => "expired",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// API Response Payloads
// ============================================================================

/// A thread resource
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadObject {
    /// Thread ID assigned by the API
    pub id: String,
}

/// A run resource
#[derive(Debug, Clone, Deserialize)]
pub struct RunObject {
    /// Run ID assigned by the API
    pub id: String,
    /// Current status
    pub status: RunStatus,
}

/// One content block of a message
#[derive(Debug, Clone, Deserialize)]
pub struct MessageContent {
    /// Text payload, when the block is textual
    #[serde(default)]
    pub text: Option<TextContent>,
}

/// Text payload of a content block
#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    /// The text itself
    pub value: String,
}

/// A message resource
#[derive(Debug, Clone, Deserialize)]
pub struct MessageObject {
    /// Message ID assigned by the API
    pub id: String,
    /// Author role
    pub role: MessageRole,
    /// Content blocks
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

impl MessageObject {
    /// Text of the first textual content block, if any
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find_map(|block| block.text.as_ref())
            .map(|text| text.value.as_str())
    }
}

/// Listing envelope for messages (newest first, per the API)
#[derive(Debug, Clone, Deserialize)]
pub struct MessageList {
    /// The messages
    pub data: Vec<MessageObject>,
}

// ============================================================================
// In-band Function-Call Protocol
// ============================================================================

/// A function call the assistant encodes as JSON in its message text
///
/// The protocol is in-band: when a run stops with `requires_action`, the
/// newest assistant message may carry
/// `{"name": "fetch_properties", "arguments": {"filter_params": {...}}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionCallRequest {
    /// Function name to dispatch
    pub name: String,
    /// Arguments object
    #[serde(default)]
    pub arguments: Value,
}

impl FunctionCallRequest {
    /// Try to parse a function call out of assistant message text
    ///
    /// Accepts the raw JSON object, or JSON embedded in surrounding prose /
    /// code fences (the models do both). Returns `None` when no function
    /// call is present.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if let Ok(call) = serde_json::from_str::<Self>(text) {
            return Some(call);
        }

        // Models sometimes wrap the JSON in markdown or prose; try the
        // outermost brace span.
        let trimmed = text.trim();
        let start = trimmed.find('{')?;
        let end = trimmed.rfind('}')?;
        if end <= start {
            return None;
        }
        serde_json::from_str(&trimmed[start..=end]).ok()
    }
}
