// ABOUTME: Property search route handlers
// ABOUTME: Exposes the filter-based inventory query as a REST endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Property routes
//!
//! The query string accepts the same filter keys the assistant's
//! `fetch_properties` tool does.

use crate::{
    database::PropertyFilter, errors::AppError, models::PropertyListing,
    resources::ServerResources,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response for the property listing
#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyListResponse {
    /// Matching listings
    pub properties: Vec<PropertyListing>,
    /// Match count
    pub total: usize,
}

/// Property routes handler
pub struct PropertyRoutes;

impl PropertyRoutes {
    /// Create all property routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/properties", get(Self::search))
            .with_state(resources)
    }

    /// Search the inventory with query-string filters
    async fn search(
        State(resources): State<Arc<ServerResources>>,
        Query(filter): Query<PropertyFilter>,
    ) -> Result<Response, AppError> {
        let properties = resources.properties.fetch_properties(&filter).await?;

        let total = properties.len();
        let response = PropertyListResponse { properties, total };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
