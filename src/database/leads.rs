// ABOUTME: Lead management database operations
// ABOUTME: Handles lead creation, lookup, listing, and contact updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Lead, LeadStatus};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create a new lead
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The email is already in use by another lead
    /// - Database operation fails
    pub async fn create_lead(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> AppResult<Lead> {
        if self.get_lead_by_email(email).await?.is_some() {
            return Err(AppError::invalid_input(
                "Email already in use by another lead",
            ));
        }

        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r"
            INSERT INTO leads (id, name, email, phone, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'new', $5, $5)
            ",
        )
        .bind(&id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(&now)
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create lead: {e}")))?;

        Ok(Lead {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
            phone: phone.map(ToOwned::to_owned),
            status: LeadStatus::New,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get a lead by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_lead(&self, lead_id: &str) -> AppResult<Option<Lead>> {
        self.get_lead_by_field("id", lead_id).await
    }

    /// Get a lead by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_lead_by_email(&self, email: &str) -> AppResult<Option<Lead>> {
        self.get_lead_by_field("email", email).await
    }

    /// List leads, most recently updated first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_leads(&self, limit: i64, offset: i64) -> AppResult<Vec<Lead>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, email, phone, status, created_at, updated_at
            FROM leads
            ORDER BY updated_at DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list leads: {e}")))?;

        Ok(rows.into_iter().map(row_to_lead).collect())
    }

    /// Update a lead's contact fields and status
    ///
    /// `None` fields are left unchanged. Returns `false` if the lead does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn update_lead(
        &self,
        lead_id: &str,
        name: Option<&str>,
        phone: Option<&str>,
        status: Option<LeadStatus>,
    ) -> AppResult<bool> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r"
            UPDATE leads
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                status = COALESCE($4, status),
                updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(lead_id)
        .bind(name)
        .bind(phone)
        .bind(status.map(LeadStatus::as_str))
        .bind(&now)
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to update lead: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_lead_by_field(&self, field: &str, value: &str) -> AppResult<Option<Lead>> {
        let query = format!(
            "SELECT id, name, email, phone, status, created_at, updated_at FROM leads WHERE {field} = $1"
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to get lead: {e}")))?;

        Ok(row.map(row_to_lead))
    }
}

fn row_to_lead(row: SqliteRow) -> Lead {
    let status: String = row.get("status");
    Lead {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        status: LeadStatus::parse(&status),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
