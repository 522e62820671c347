// ABOUTME: Unit tests for the nexus tag derivation routines
// ABOUTME: Tests qualification aggregates, discovery, revocation, and idempotency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use common::{create_test_pool, seed_condition, seed_lead};
use rentora_server::database::NexusTagManager;
use sqlx::SqlitePool;

async fn setup() -> (SqlitePool, String) {
    let pool = create_test_pool().await;
    let user_id = seed_lead(&pool, "Ann", "ann@example.com").await;
    (pool, user_id)
}

#[tokio::test]
async fn test_discover_requires_both_condition_states() {
    let (pool, user_id) = setup().await;

    // tag-a has an in-service and a current condition; tag-b only in-service
    seed_condition(&pool, &user_id, true, &["tag-a", "tag-b"]).await;
    seed_condition(&pool, &user_id, false, &["tag-a"]).await;

    let manager = NexusTagManager::new(pool);
    let discovered = manager.discover_nexus_tags(&user_id).await.unwrap();

    assert_eq!(discovered, vec!["tag-a".to_owned()]);

    let active = manager.active_nexus_tags(&user_id).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].tag_id, "tag-a");
    assert!(active[0].revoked_at.is_none());
}

#[tokio::test]
async fn test_discover_is_idempotent() {
    let (pool, user_id) = setup().await;

    seed_condition(&pool, &user_id, true, &["tag-a"]).await;
    seed_condition(&pool, &user_id, false, &["tag-a"]).await;

    let manager = NexusTagManager::new(pool);

    let first = manager.discover_nexus_tags(&user_id).await.unwrap();
    assert_eq!(first.len(), 1);

    let second = manager.discover_nexus_tags(&user_id).await.unwrap();
    assert!(second.is_empty());

    let active = manager.active_nexus_tags(&user_id).await.unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn test_discover_no_conditions_inserts_nothing() {
    let (pool, user_id) = setup().await;

    let manager = NexusTagManager::new(pool);
    let discovered = manager.discover_nexus_tags(&user_id).await.unwrap();

    assert!(discovered.is_empty());
}

#[tokio::test]
async fn test_revoke_when_no_longer_qualified() {
    let (pool, user_id) = setup().await;

    let in_service = seed_condition(&pool, &user_id, true, &["tag-a"]).await;
    seed_condition(&pool, &user_id, false, &["tag-a"]).await;

    let manager = NexusTagManager::new(pool.clone());
    manager.discover_nexus_tags(&user_id).await.unwrap();

    // Remove the in-service condition; tag-a no longer has both states
    sqlx::query("DELETE FROM conditions WHERE id = $1")
        .bind(&in_service)
        .execute(&pool)
        .await
        .unwrap();

    let revoked = manager.revoke_nexus_tags_if_invalid(&user_id).await.unwrap();
    assert_eq!(revoked, 1);

    let active = manager.active_nexus_tags(&user_id).await.unwrap();
    assert!(active.is_empty());

    // Re-running revokes nothing further
    let revoked_again = manager.revoke_nexus_tags_if_invalid(&user_id).await.unwrap();
    assert_eq!(revoked_again, 0);
}

#[tokio::test]
async fn test_revoke_keeps_still_qualified_tags() {
    let (pool, user_id) = setup().await;

    seed_condition(&pool, &user_id, true, &["tag-a", "tag-b"]).await;
    seed_condition(&pool, &user_id, false, &["tag-a", "tag-b"]).await;

    let manager = NexusTagManager::new(pool.clone());
    manager.discover_nexus_tags(&user_id).await.unwrap();

    // Detach tag-b from the current condition only
    sqlx::query(
        r"
        DELETE FROM condition_tags
        WHERE tag_id = 'tag-b'
          AND condition_id IN (SELECT id FROM conditions WHERE in_service = 0)
        ",
    )
    .execute(&pool)
    .await
    .unwrap();

    let revoked = manager.revoke_nexus_tags_if_invalid(&user_id).await.unwrap();
    assert_eq!(revoked, 1);

    let active = manager.active_nexus_tags(&user_id).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].tag_id, "tag-a");
}

#[tokio::test]
async fn test_requalified_tag_gets_new_active_row() {
    let (pool, user_id) = setup().await;

    let in_service = seed_condition(&pool, &user_id, true, &["tag-a"]).await;
    seed_condition(&pool, &user_id, false, &["tag-a"]).await;

    let manager = NexusTagManager::new(pool.clone());
    manager.discover_nexus_tags(&user_id).await.unwrap();

    sqlx::query("DELETE FROM conditions WHERE id = $1")
        .bind(&in_service)
        .execute(&pool)
        .await
        .unwrap();
    manager.revoke_nexus_tags_if_invalid(&user_id).await.unwrap();

    // The tag qualifies again
    seed_condition(&pool, &user_id, true, &["tag-a"]).await;
    let rediscovered = manager.discover_nexus_tags(&user_id).await.unwrap();
    assert_eq!(rediscovered, vec!["tag-a".to_owned()]);

    // One active row now, and the revoked row is preserved as history
    let active = manager.active_nexus_tags(&user_id).await.unwrap();
    assert_eq!(active.len(), 1);

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM nexus_tags WHERE user_id = $1")
        .bind(&user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total, 2);
}

#[tokio::test]
async fn test_derivation_is_scoped_per_user() {
    let pool = create_test_pool().await;
    let ann = seed_lead(&pool, "Ann", "ann@example.com").await;
    let bob = seed_lead(&pool, "Bob", "bob@example.com").await;

    // Ann qualifies for tag-a; Bob holds only an in-service condition
    seed_condition(&pool, &ann, true, &["tag-a"]).await;
    seed_condition(&pool, &ann, false, &["tag-a"]).await;
    seed_condition(&pool, &bob, true, &["tag-a"]).await;

    let manager = NexusTagManager::new(pool);

    let ann_tags = manager.discover_nexus_tags(&ann).await.unwrap();
    assert_eq!(ann_tags.len(), 1);

    let bob_tags = manager.discover_nexus_tags(&bob).await.unwrap();
    assert!(bob_tags.is_empty());
}
