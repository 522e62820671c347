// ABOUTME: Core database management with migration support for SQLite
// ABOUTME: Handles schema setup, leads, chat history, properties, and nexus tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Database access layer
//!
//! [`Database`] wraps the connection pool and runs migrations. Domain
//! operations live either directly on `Database` (leads) or in focused
//! managers constructed from the pool (chat, properties, nexus tags).

/// Chat thread and message storage
pub mod chat;
/// Lead account management
pub mod leads;
/// Nexus tag derivation over condition aggregates
pub mod nexus_tags;
/// Property inventory queries
pub mod properties;

pub use chat::ChatManager;
pub use nexus_tags::NexusTagManager;
pub use properties::{PropertyFilter, PropertyManager};

use crate::errors::{AppError, AppResult};
use sqlx::SqlitePool;
use tracing::info;

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run pending migrations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database URL is invalid or malformed
    /// - Database connection fails
    /// - `SQLite` file creation fails
    /// - Migration process fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!("Database ready at {database_url}");
        Ok(db)
    }

    /// Run pending migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the migration process fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to run migrations: {e}")))
    }

    /// Access the underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
