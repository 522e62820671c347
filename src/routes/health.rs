// ABOUTME: Health check route handlers
// ABOUTME: Provides liveness status including a database reachability ping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Health routes

use crate::{errors::AppError, resources::ServerResources};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Health check route handlers
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/health", get(Self::health))
            .with_state(resources)
    }

    /// Liveness check with a database ping
    async fn health(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        sqlx::query("SELECT 1")
            .execute(resources.database.pool())
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;

        let body = json!({
            "status": "ok",
            "service": "rentora-server",
            "database": "reachable",
        });

        Ok((StatusCode::OK, Json(body)).into_response())
    }
}
