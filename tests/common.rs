// ABOUTME: Shared test helpers for database-backed integration tests
// ABOUTME: Builds in-memory schemas mirroring the migrations and seeds fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

#![allow(dead_code, clippy::unwrap_used, missing_docs)]

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Create an in-memory database with the full schema
///
/// A single connection keeps the in-memory database alive and shared for
/// the whole test.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    for statement in [
        r"
        CREATE TABLE leads (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            phone TEXT,
            status TEXT NOT NULL DEFAULT 'new' CHECK (status IN ('new', 'contacted', 'qualified', 'closed')),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        ",
        r"
        CREATE TABLE chat_threads (
            id TEXT PRIMARY KEY,
            lead_id TEXT REFERENCES leads(id) ON DELETE SET NULL,
            remote_thread_id TEXT UNIQUE NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        ",
        r"
        CREATE TABLE chat_messages (
            id TEXT PRIMARY KEY,
            thread_id TEXT NOT NULL REFERENCES chat_threads(id) ON DELETE CASCADE,
            role TEXT NOT NULL CHECK (role IN ('system', 'user', 'assistant', 'tool')),
            content TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        ",
        r"
        CREATE TABLE buildings (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            distance_to_bts REAL,
            created_at TEXT NOT NULL
        )
        ",
        r"
        CREATE TABLE properties (
            id TEXT PRIMARY KEY,
            building_id TEXT NOT NULL REFERENCES buildings(id) ON DELETE CASCADE,
            property_code TEXT UNIQUE NOT NULL,
            building_name TEXT,
            bedrooms INTEGER NOT NULL,
            bathrooms INTEGER NOT NULL,
            price REAL,
            size REAL,
            photo_urls TEXT,
            created_at TEXT NOT NULL
        )
        ",
        r"
        CREATE TABLE conditions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES leads(id) ON DELETE CASCADE,
            in_service INTEGER NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL
        )
        ",
        r"
        CREATE TABLE condition_tags (
            condition_id TEXT NOT NULL REFERENCES conditions(id) ON DELETE CASCADE,
            tag_id TEXT NOT NULL,
            PRIMARY KEY (condition_id, tag_id)
        )
        ",
        r"
        CREATE TABLE nexus_tags (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES leads(id) ON DELETE CASCADE,
            tag_id TEXT NOT NULL,
            discovered_at TEXT NOT NULL,
            revoked_at TEXT
        )
        ",
    ] {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }

    pool
}

/// Insert a lead row and return its id
pub async fn seed_lead(pool: &SqlitePool, name: &str, email: &str) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        r"
        INSERT INTO leads (id, name, email, phone, status, created_at, updated_at)
        VALUES ($1, $2, $3, NULL, 'new', '2025-01-01T00:00:00+00:00', '2025-01-01T00:00:00+00:00')
        ",
    )
    .bind(&id)
    .bind(name)
    .bind(email)
    .execute(pool)
    .await
    .unwrap();
    id
}

/// Insert a building row and return its id
pub async fn seed_building(pool: &SqlitePool, name: &str, distance_to_bts: f64) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        r"
        INSERT INTO buildings (id, name, distance_to_bts, created_at)
        VALUES ($1, $2, $3, '2025-01-01T00:00:00+00:00')
        ",
    )
    .bind(&id)
    .bind(name)
    .bind(distance_to_bts)
    .execute(pool)
    .await
    .unwrap();
    id
}

/// Insert a property row
#[allow(clippy::too_many_arguments)]
pub async fn seed_property(
    pool: &SqlitePool,
    building_id: &str,
    property_code: &str,
    bedrooms: i64,
    bathrooms: i64,
    price: f64,
    size: f64,
    photo_urls: Option<&str>,
) {
    sqlx::query(
        r"
        INSERT INTO properties
            (id, building_id, property_code, building_name, bedrooms, bathrooms, price, size, photo_urls, created_at)
        VALUES ($1, $2, $3, NULL, $4, $5, $6, $7, $8, '2025-01-01T00:00:00+00:00')
        ",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(building_id)
    .bind(property_code)
    .bind(bedrooms)
    .bind(bathrooms)
    .bind(price)
    .bind(size)
    .bind(photo_urls)
    .execute(pool)
    .await
    .unwrap();
}

/// Insert a condition with its tag links and return the condition id
pub async fn seed_condition(
    pool: &SqlitePool,
    user_id: &str,
    in_service: bool,
    tag_ids: &[&str],
) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        r"
        INSERT INTO conditions (id, user_id, in_service, description, created_at)
        VALUES ($1, $2, $3, NULL, '2025-01-01T00:00:00+00:00')
        ",
    )
    .bind(&id)
    .bind(user_id)
    .bind(in_service)
    .execute(pool)
    .await
    .unwrap();

    for tag_id in tag_ids {
        sqlx::query("INSERT INTO condition_tags (condition_id, tag_id) VALUES ($1, $2)")
            .bind(&id)
            .bind(tag_id)
            .execute(pool)
            .await
            .unwrap();
    }

    id
}
