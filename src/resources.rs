// ABOUTME: Shared dependency container handed to every HTTP handler
// ABOUTME: Bundles the database, domain managers, assistant client, and config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

use crate::config::ServerConfig;
use crate::database::{ChatManager, Database, NexusTagManager, PropertyManager};
use crate::llm::AssistantClient;

/// Server-wide resources shared across routes via `State<Arc<ServerResources>>`
pub struct ServerResources {
    /// Database pool wrapper (lead operations live here)
    pub database: Database,
    /// Chat thread and message storage
    pub chat: ChatManager,
    /// Property inventory queries
    pub properties: PropertyManager,
    /// Nexus tag derivation
    pub nexus_tags: NexusTagManager,
    /// Assistant-thread API client
    pub assistant: AssistantClient,
    /// Loaded configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle resources for the HTTP layer
    #[must_use]
    pub fn new(database: Database, assistant: AssistantClient, config: ServerConfig) -> Self {
        let pool = database.pool().clone();
        Self {
            chat: ChatManager::new(pool.clone()),
            properties: PropertyManager::new(pool.clone()),
            nexus_tags: NexusTagManager::new(pool),
            database,
            assistant,
            config,
        }
    }
}
