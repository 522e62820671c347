// ABOUTME: Nexus tag derivation over aggregate condition data
// ABOUTME: Discovers and revokes derived tag rows per user in batch transactions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Nexus tag derivation
//!
//! A tag qualifies for a user when, across the user's conditions joined
//! through `condition_tags`, it has at least one condition with
//! `in_service = TRUE` and at least one with `in_service = FALSE`.
//! [`NexusTagManager::discover_nexus_tags`] inserts active rows for newly
//! qualified tags; [`NexusTagManager::revoke_nexus_tags_if_invalid`] stamps
//! `revoked_at` on active rows that no longer qualify. Both routines run in
//! a single transaction and are idempotent.

use crate::errors::{AppError, AppResult};
use crate::models::NexusTagRecord;
use sqlx::{Row, SqliteConnection, SqlitePool};
use std::collections::HashSet;
use uuid::Uuid;

/// Tag ids with both an in-service and a current condition for the user
const QUALIFYING_TAGS_SQL: &str = r"
    SELECT ct.tag_id
    FROM condition_tags ct
    JOIN conditions c ON ct.condition_id = c.id
    WHERE c.user_id = $1
    GROUP BY ct.tag_id
    HAVING COUNT(CASE WHEN c.in_service = 1 THEN 1 END) > 0
       AND COUNT(CASE WHEN c.in_service = 0 THEN 1 END) > 0
";

/// Nexus tag database operations manager
pub struct NexusTagManager {
    pool: SqlitePool,
}

impl NexusTagManager {
    /// Create a new nexus tag manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert active nexus tag rows for newly qualified tags
    ///
    /// Returns the tag ids inserted in this pass.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn discover_nexus_tags(&self, user_id: &str) -> AppResult<Vec<String>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let qualifying = Self::qualifying_tag_ids(&mut tx, user_id).await?;
        let active = Self::active_tag_ids(&mut tx, user_id).await?;

        let now = chrono::Utc::now().to_rfc3339();
        let mut newly_qualified: Vec<String> =
            qualifying.difference(&active).cloned().collect();
        newly_qualified.sort();

        for tag_id in &newly_qualified {
            sqlx::query(
                r"
                INSERT INTO nexus_tags (id, user_id, tag_id, discovered_at, revoked_at)
                VALUES ($1, $2, $3, $4, NULL)
                ",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(user_id)
            .bind(tag_id)
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert nexus tag: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))?;

        Ok(newly_qualified)
    }

    /// Revoke active nexus tag rows whose tags no longer qualify
    ///
    /// Returns the number of rows revoked.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn revoke_nexus_tags_if_invalid(&self, user_id: &str) -> AppResult<u64> {
        let now = chrono::Utc::now().to_rfc3339();

        let sql = format!(
            r"
            UPDATE nexus_tags
            SET revoked_at = $2
            WHERE user_id = $1
              AND revoked_at IS NULL
              AND tag_id NOT IN ({QUALIFYING_TAGS_SQL})
            "
        );

        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(&now)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to revoke nexus tags: {e}")))?;

        Ok(result.rows_affected())
    }

    /// List the user's active (unrevoked) nexus tags
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn active_nexus_tags(&self, user_id: &str) -> AppResult<Vec<NexusTagRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, tag_id, discovered_at, revoked_at
            FROM nexus_tags
            WHERE user_id = $1 AND revoked_at IS NULL
            ORDER BY discovered_at ASC, tag_id ASC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list nexus tags: {e}")))?;

        let records = rows
            .into_iter()
            .map(|r| NexusTagRecord {
                id: r.get("id"),
                user_id: r.get("user_id"),
                tag_id: r.get("tag_id"),
                discovered_at: r.get("discovered_at"),
                revoked_at: r.get("revoked_at"),
            })
            .collect();

        Ok(records)
    }

    async fn qualifying_tag_ids(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        user_id: &str,
    ) -> AppResult<HashSet<String>> {
        Self::tag_id_set(&mut *tx, QUALIFYING_TAGS_SQL, user_id).await
    }

    async fn active_tag_ids(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        user_id: &str,
    ) -> AppResult<HashSet<String>> {
        Self::tag_id_set(
            &mut *tx,
            "SELECT tag_id FROM nexus_tags WHERE user_id = $1 AND revoked_at IS NULL",
            user_id,
        )
        .await
    }

    async fn tag_id_set(
        conn: &mut SqliteConnection,
        sql: &str,
        user_id: &str,
    ) -> AppResult<HashSet<String>> {
        let rows = sqlx::query(sql)
            .bind(user_id)
            .fetch_all(conn)
            .await
            .map_err(|e| AppError::database(format!("Failed to query tag ids: {e}")))?;

        Ok(rows.into_iter().map(|r| r.get("tag_id")).collect())
    }
}
