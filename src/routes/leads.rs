// ABOUTME: Lead management route handlers
// ABOUTME: Provides REST endpoints for creating, listing, and updating leads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Lead routes

use crate::{errors::AppError, models::LeadStatus, resources::ServerResources};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to create a lead
#[derive(Debug, Deserialize)]
pub struct CreateLeadRequest {
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
}

/// Request to update a lead; omitted fields are unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateLeadRequest {
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New phone
    #[serde(default)]
    pub phone: Option<String>,
    /// New lifecycle status
    #[serde(default)]
    pub status: Option<LeadStatus>,
}

/// Response for a single lead
#[derive(Debug, Serialize, Deserialize)]
pub struct LeadResponse {
    /// Lead ID
    pub id: String,
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Lifecycle status
    pub status: LeadStatus,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl From<crate::models::Lead> for LeadResponse {
    fn from(lead: crate::models::Lead) -> Self {
        Self {
            id: lead.id,
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            status: lead.status,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}

/// Response for the lead listing
#[derive(Debug, Serialize, Deserialize)]
pub struct LeadListResponse {
    /// Leads, most recently updated first
    pub leads: Vec<LeadResponse>,
    /// Count in this page
    pub total: usize,
}

/// Query parameters for listing leads
#[derive(Debug, Deserialize, Default)]
pub struct ListLeadsQuery {
    /// Maximum number of leads to return
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Offset for pagination
    #[serde(default)]
    pub offset: i64,
}

const fn default_limit() -> i64 {
    20
}

// ============================================================================
// Lead Routes
// ============================================================================

/// Lead routes handler
pub struct LeadRoutes;

impl LeadRoutes {
    /// Create all lead routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/leads", post(Self::create_lead))
            .route("/api/leads", get(Self::list_leads))
            .route("/api/leads/:lead_id", get(Self::get_lead))
            .route("/api/leads/:lead_id", put(Self::update_lead))
            .with_state(resources)
    }

    /// Create a new lead
    async fn create_lead(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateLeadRequest>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() || request.email.trim().is_empty() {
            return Err(AppError::invalid_input("name and email are required"));
        }

        let lead = resources
            .database
            .create_lead(
                request.name.trim(),
                request.email.trim(),
                request.phone.as_deref(),
            )
            .await?;

        Ok((StatusCode::CREATED, Json(LeadResponse::from(lead))).into_response())
    }

    /// List leads with pagination
    async fn list_leads(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListLeadsQuery>,
    ) -> Result<Response, AppError> {
        let leads = resources
            .database
            .list_leads(query.limit, query.offset)
            .await?;

        let total = leads.len();
        let response = LeadListResponse {
            leads: leads.into_iter().map(LeadResponse::from).collect(),
            total,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Get a specific lead
    async fn get_lead(
        State(resources): State<Arc<ServerResources>>,
        Path(lead_id): Path<String>,
    ) -> Result<Response, AppError> {
        let lead = resources
            .database
            .get_lead(&lead_id)
            .await?
            .ok_or_else(|| AppError::not_found("Lead not found"))?;

        Ok((StatusCode::OK, Json(LeadResponse::from(lead))).into_response())
    }

    /// Update a lead's contact fields and status
    async fn update_lead(
        State(resources): State<Arc<ServerResources>>,
        Path(lead_id): Path<String>,
        Json(request): Json<UpdateLeadRequest>,
    ) -> Result<Response, AppError> {
        let updated = resources
            .database
            .update_lead(
                &lead_id,
                request.name.as_deref(),
                request.phone.as_deref(),
                request.status,
            )
            .await?;

        if !updated {
            return Err(AppError::not_found("Lead not found"));
        }

        let lead = resources
            .database
            .get_lead(&lead_id)
            .await?
            .ok_or_else(|| AppError::internal("Lead not found after update"))?;

        Ok((StatusCode::OK, Json(LeadResponse::from(lead))).into_response())
    }
}
