// ABOUTME: Database operations for chat threads and message history
// ABOUTME: Maps remote assistant threads to local records with ordered messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

use crate::errors::{AppError, AppResult};
use crate::llm::MessageRole;
use crate::models::{MessageRecord, ThreadRecord};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

// ============================================================================
// Chat Manager
// ============================================================================

/// Chat database operations manager
pub struct ChatManager {
    pool: SqlitePool,
}

impl ChatManager {
    /// Create a new chat manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Thread Operations
    // ========================================================================

    /// Create a local record for a remote assistant thread
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create_thread(
        &self,
        remote_thread_id: &str,
        lead_id: Option<&str>,
    ) -> AppResult<ThreadRecord> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r"
            INSERT INTO chat_threads (id, lead_id, remote_thread_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ",
        )
        .bind(&id)
        .bind(lead_id)
        .bind(remote_thread_id)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create thread: {e}")))?;

        Ok(ThreadRecord {
            id,
            lead_id: lead_id.map(ToOwned::to_owned),
            remote_thread_id: remote_thread_id.to_owned(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get the local record for a remote thread ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_thread_by_remote_id(
        &self,
        remote_thread_id: &str,
    ) -> AppResult<Option<ThreadRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, lead_id, remote_thread_id, created_at, updated_at
            FROM chat_threads
            WHERE remote_thread_id = $1
            ",
        )
        .bind(remote_thread_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get thread: {e}")))?;

        Ok(row.map(|r| ThreadRecord {
            id: r.get("id"),
            lead_id: r.get("lead_id"),
            remote_thread_id: r.get("remote_thread_id"),
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
        }))
    }

    /// Get the local record for a remote thread, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get_or_create_thread(
        &self,
        remote_thread_id: &str,
        lead_id: Option<&str>,
    ) -> AppResult<ThreadRecord> {
        if let Some(thread) = self.get_thread_by_remote_id(remote_thread_id).await? {
            return Ok(thread);
        }
        self.create_thread(remote_thread_id, lead_id).await
    }

    /// Delete a thread and its messages (cascade)
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_thread(&self, thread_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM chat_threads WHERE id = $1")
            .bind(thread_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete thread: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    // ========================================================================
    // Message Operations
    // ========================================================================

    /// Add a message to a thread
    ///
    /// # Errors
    ///
    /// Returns an error if the thread does not exist or the database
    /// operation fails
    pub async fn add_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> AppResult<MessageRecord> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();
        let role_str = role.as_str();

        // Insert only if the thread exists
        let result = sqlx::query(
            r"
            INSERT INTO chat_messages (id, thread_id, role, content, created_at)
            SELECT $1, $2, $3, $4, $5
            WHERE EXISTS (SELECT 1 FROM chat_threads WHERE id = $2)
            ",
        )
        .bind(&id)
        .bind(thread_id)
        .bind(role_str)
        .bind(content)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add message: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Thread not found"));
        }

        sqlx::query("UPDATE chat_threads SET updated_at = $1 WHERE id = $2")
            .bind(&now)
            .bind(thread_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update thread timestamp: {e}")))?;

        Ok(MessageRecord {
            id,
            thread_id: thread_id.to_owned(),
            role: role_str.to_owned(),
            content: content.to_owned(),
            created_at: now,
        })
    }

    /// Get all messages for a thread in chronological order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_messages(&self, thread_id: &str) -> AppResult<Vec<MessageRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, thread_id, role, content, created_at
            FROM chat_messages
            WHERE thread_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get messages: {e}")))?;

        let messages = rows
            .into_iter()
            .map(|r| MessageRecord {
                id: r.get("id"),
                thread_id: r.get("thread_id"),
                role: r.get("role"),
                content: r.get("content"),
                created_at: r.get("created_at"),
            })
            .collect();

        Ok(messages)
    }

    /// Get message count for a thread
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_message_count(&self, thread_id: &str) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM chat_messages WHERE thread_id = $1")
            .bind(thread_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get message count: {e}")))?;

        Ok(row.get("count"))
    }
}
