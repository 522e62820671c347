// ABOUTME: Property inventory queries with filter-based search
// ABOUTME: Translates filter params into SQL over properties joined with buildings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Property search
//!
//! [`PropertyFilter`] carries the optional search parameters accepted both
//! by the REST endpoint (query string) and by the assistant's
//! `fetch_properties` tool (JSON `filter_params`). All present filters are
//! combined with AND.

use crate::errors::{AppError, AppResult};
use crate::models::PropertyListing;
use serde::Deserialize;
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

/// Placeholder URL stored for units without photos; never served to clients
const NO_IMAGE_PLACEHOLDER: &str =
    "https://pub-5639854ae5864779be6f398a0fa1c555.r2.dev/noimageyet.jpg";

/// Search filters for the property inventory
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyFilter {
    /// Minimum number of bedrooms
    pub bedrooms: Option<i64>,
    /// Maximum number of bedrooms
    pub max_bedrooms: Option<i64>,
    /// Minimum number of bathrooms
    pub bathrooms: Option<i64>,
    /// Maximum number of bathrooms
    pub max_bathrooms: Option<i64>,
    /// Minimum rental price
    pub price: Option<f64>,
    /// Maximum rental price
    pub max_price: Option<f64>,
    /// Minimum size in square meters
    pub sq_meters: Option<f64>,
    /// Maximum size in square meters
    pub max_sq_meters: Option<f64>,
    /// Maximum distance from the nearest BTS station in kilometers
    pub distance_from_bts: Option<f64>,
    /// Property name search (matches the building name)
    pub property_name: Option<String>,
    /// Building name search
    pub building_name: Option<String>,
    /// Unique property code for narrowing the results
    pub property_code: Option<String>,
}

/// Property database operations manager
#[derive(Clone)]
pub struct PropertyManager {
    pool: SqlitePool,
}

impl PropertyManager {
    /// Create a new property manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Query the inventory with the given filters and serialize the rows
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn fetch_properties(
        &self,
        filter: &PropertyFilter,
    ) -> AppResult<Vec<PropertyListing>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT p.property_code, p.building_name, b.name AS joined_building_name, \
             p.bedrooms, p.bathrooms, p.price, p.size, p.photo_urls, p.created_at \
             FROM properties p \
             JOIN buildings b ON p.building_id = b.id \
             WHERE 1 = 1",
        );

        if let Some(min) = filter.bedrooms {
            builder.push(" AND p.bedrooms >= ").push_bind(min);
        }
        if let Some(max) = filter.max_bedrooms {
            builder.push(" AND p.bedrooms <= ").push_bind(max);
        }
        if let Some(min) = filter.bathrooms {
            builder.push(" AND p.bathrooms >= ").push_bind(min);
        }
        if let Some(max) = filter.max_bathrooms {
            builder.push(" AND p.bathrooms <= ").push_bind(max);
        }
        if let Some(min) = filter.price {
            builder.push(" AND p.price >= ").push_bind(min);
        }
        if let Some(max) = filter.max_price {
            builder.push(" AND p.price <= ").push_bind(max);
        }
        if let Some(min) = filter.sq_meters {
            builder.push(" AND p.size >= ").push_bind(min);
        }
        if let Some(max) = filter.max_sq_meters {
            builder.push(" AND p.size <= ").push_bind(max);
        }
        if let Some(max) = filter.distance_from_bts {
            builder.push(" AND b.distance_to_bts <= ").push_bind(max);
        }
        // property_name is accepted as an alias for the building name search
        if let Some(ref name) = filter.property_name {
            builder
                .push(" AND b.name LIKE ")
                .push_bind(format!("%{name}%"));
        }
        if let Some(ref name) = filter.building_name {
            builder
                .push(" AND b.name LIKE ")
                .push_bind(format!("%{name}%"));
        }
        if let Some(ref code) = filter.property_code {
            builder.push(" AND p.property_code = ").push_bind(code);
        }

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch properties: {e}")))?;

        Ok(rows.into_iter().map(row_to_listing).collect())
    }
}

fn row_to_listing(row: SqliteRow) -> PropertyListing {
    let building_name: Option<String> = row.get("building_name");
    let joined_building_name: Option<String> = row.get("joined_building_name");
    let photo_urls: Option<String> = row.get("photo_urls");

    PropertyListing {
        property_code: row.get("property_code"),
        building_name: building_name.or(joined_building_name),
        bedrooms: row.get("bedrooms"),
        bathrooms: row.get("bathrooms"),
        price: row.get("price"),
        size_sqm: row.get("size"),
        created_at: row.get("created_at"),
        images: photo_urls.as_deref().map(collect_images).unwrap_or_default(),
    }
}

/// Flatten the stored `photo_urls` JSON into a flat URL list
///
/// The column holds an object keyed by room/category, each value a list of
/// URLs. Placeholder entries are dropped; any other shape yields no images.
fn collect_images(raw: &str) -> Vec<String> {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
        return Vec::new();
    };

    let mut images = Vec::new();
    for urls in map.values() {
        if let Value::Array(list) = urls {
            images.extend(
                list.iter()
                    .filter_map(Value::as_str)
                    .filter(|url| *url != NO_IMAGE_PLACEHOLDER)
                    .map(ToOwned::to_owned),
            );
        }
    }
    images
}
