// ABOUTME: Viewing-scheduling stub route handlers
// ABOUTME: Documents the scheduling surface without implementing it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Scheduler routes
//!
//! Viewing scheduling is not implemented yet; the endpoint exists so the
//! surface is discoverable and returns a structured 501.

use crate::{errors::AppError, resources::ServerResources};
use axum::{response::Response, routing::post, Router};
use std::sync::Arc;

/// Scheduler routes handler
pub struct SchedulerRoutes;

impl SchedulerRoutes {
    /// Create all scheduler routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/schedule/viewings", post(Self::schedule_viewing))
            .with_state(resources)
    }

    /// Placeholder for viewing scheduling
    async fn schedule_viewing() -> Result<Response, AppError> {
        Err(AppError::not_implemented(
            "Viewing scheduling is not available yet",
        ))
    }
}
