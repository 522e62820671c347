// ABOUTME: Unit tests for lead database operations
// ABOUTME: Tests creation, lookup, listing, and partial updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use rentora_server::database::Database;
use rentora_server::models::LeadStatus;
use tempfile::TempDir;

/// File-backed database so the pool shares one schema across connections
async fn create_test_database() -> (Database, TempDir) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}/test.db", dir.path().display());
    let database = Database::new(&url).await.unwrap();
    (database, dir)
}

#[tokio::test]
async fn test_create_lead() {
    let (db, _dir) = create_test_database().await;

    let lead = db
        .create_lead("Somchai P.", "somchai@example.com", Some("+66 81 234 5678"))
        .await
        .unwrap();

    assert!(!lead.id.is_empty());
    assert_eq!(lead.name, "Somchai P.");
    assert_eq!(lead.email, "somchai@example.com");
    assert_eq!(lead.phone.as_deref(), Some("+66 81 234 5678"));
    assert_eq!(lead.status, LeadStatus::New);
}

#[tokio::test]
async fn test_create_lead_duplicate_email() {
    let (db, _dir) = create_test_database().await;

    db.create_lead("Ann", "ann@example.com", None).await.unwrap();
    let result = db.create_lead("Other Ann", "ann@example.com", None).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_get_lead_by_id_and_email() {
    let (db, _dir) = create_test_database().await;

    let created = db.create_lead("Ann", "ann@example.com", None).await.unwrap();

    let by_id = db.get_lead(&created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "ann@example.com");

    let by_email = db
        .get_lead_by_email("ann@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, created.id);

    assert!(db.get_lead("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_leads_pagination() {
    let (db, _dir) = create_test_database().await;

    for i in 1..=5 {
        db.create_lead(&format!("Lead {i}"), &format!("lead{i}@example.com"), None)
            .await
            .unwrap();
    }

    let page1 = db.list_leads(2, 0).await.unwrap();
    assert_eq!(page1.len(), 2);

    let page2 = db.list_leads(2, 2).await.unwrap();
    assert_eq!(page2.len(), 2);

    let page3 = db.list_leads(2, 4).await.unwrap();
    assert_eq!(page3.len(), 1);
}

#[tokio::test]
async fn test_update_lead_partial() {
    let (db, _dir) = create_test_database().await;

    let lead = db.create_lead("Ann", "ann@example.com", None).await.unwrap();

    // Only the status changes; name and phone stay as they were
    let updated = db
        .update_lead(&lead.id, None, None, Some(LeadStatus::Qualified))
        .await
        .unwrap();
    assert!(updated);

    let fetched = db.get_lead(&lead.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Ann");
    assert_eq!(fetched.status, LeadStatus::Qualified);

    // Phone-only update preserves the new status
    db.update_lead(&lead.id, None, Some("+66 90 000 0000"), None)
        .await
        .unwrap();
    let fetched = db.get_lead(&lead.id).await.unwrap().unwrap();
    assert_eq!(fetched.phone.as_deref(), Some("+66 90 000 0000"));
    assert_eq!(fetched.status, LeadStatus::Qualified);
}

#[tokio::test]
async fn test_update_missing_lead() {
    let (db, _dir) = create_test_database().await;

    let updated = db
        .update_lead("missing", Some("Name"), None, None)
        .await
        .unwrap();

    assert!(!updated);
}
