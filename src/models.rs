// ABOUTME: Common data models for leads, chat history, and property inventory
// ABOUTME: Plain serializable records mirroring the relational schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Domain records shared between the database layer and route handlers
//!
//! Timestamps are RFC 3339 strings throughout, matching the TEXT columns
//! they are stored in.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    /// Newly captured, not yet contacted
    New,
    /// An agent has reached out
    Contacted,
    /// Budget and requirements confirmed
    Qualified,
    /// No longer active
    Closed,
}

impl LeadStatus {
    /// Database representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Closed => "closed",
        }
    }

    /// Parse the database representation, defaulting unknown values to `New`
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "contacted" => Self::Contacted,
            "qualified" => Self::Qualified,
            "closed" => Self::Closed,
            _ => Self::New,
        }
    }
}

/// A rental prospect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    /// Lead ID
    pub id: String,
    /// Full name
    pub name: String,
    /// Contact email (unique)
    pub email: String,
    /// Contact phone, if provided
    pub phone: Option<String>,
    /// Lifecycle status
    pub status: LeadStatus,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Local record of an assistant conversation thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadRecord {
    /// Local thread ID
    pub id: String,
    /// Owning lead, if the conversation is attached to one
    pub lead_id: Option<String>,
    /// Thread ID on the assistant API side
    pub remote_thread_id: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last activity timestamp
    pub updated_at: String,
}

/// A persisted chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Message ID
    pub id: String,
    /// Local thread the message belongs to
    pub thread_id: String,
    /// Role (system/user/assistant/tool)
    pub role: String,
    /// Message content
    pub content: String,
    /// Creation timestamp
    pub created_at: String,
}

/// A rentable unit as served by the property search
///
/// This is the serialized shape returned to clients and to the assistant
/// as a tool result. `images` flattens the stored `photo_urls` JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyListing {
    /// Unique property code
    pub property_code: String,
    /// Building name (unit-level override wins over the joined building)
    pub building_name: Option<String>,
    /// Bedroom count
    pub bedrooms: i64,
    /// Bathroom count
    pub bathrooms: i64,
    /// Monthly rental price
    pub price: Option<f64>,
    /// Unit size in square meters
    pub size_sqm: Option<f64>,
    /// Listing creation timestamp
    pub created_at: Option<String>,
    /// Flattened photo URLs, placeholder entries removed
    pub images: Vec<String>,
}

/// A derived nexus tag row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NexusTagRecord {
    /// Row ID
    pub id: String,
    /// User (lead) the tag applies to
    pub user_id: String,
    /// Derived tag
    pub tag_id: String,
    /// When the tag first qualified
    pub discovered_at: String,
    /// When the tag stopped qualifying; NULL while active
    pub revoked_at: Option<String>,
}
