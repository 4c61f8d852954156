//! Integration tests for notification persistence and the read API:
//! - transactional create across both tables
//! - one-translation-per-locale enforcement
//! - locale-scoped listing, pagination, read-state transitions

use assert_matches::assert_matches;
use depot_core::asset::{AssetCondition, AssetStatus};
use depot_core::types::DbId;
use depot_db::models::asset::CreateAsset;
use depot_db::models::notification::{CreateNotification, CreateTranslation};
use depot_db::repositories::{AssetRepo, NotificationRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, name: &str, email: &str) -> DbId {
    UserRepo::create(pool, name, email).await.unwrap().id
}

async fn new_asset(pool: &PgPool, tag: &str) -> DbId {
    AssetRepo::create(
        pool,
        &CreateAsset {
            asset_tag: tag.to_string(),
            name: format!("Asset {tag}"),
            status: AssetStatus::Active,
            condition: AssetCondition::Good,
            assigned_to: None,
            warranty_expires_on: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn translation(locale: &str, title: &str, message: &str) -> CreateTranslation {
    CreateTranslation {
        locale: locale.to_string(),
        title: title.to_string(),
        message: message.to_string(),
    }
}

fn assigned_notification(recipient: DbId, asset_id: DbId) -> CreateNotification {
    CreateNotification {
        recipient_user_id: recipient,
        related_entity_type: "asset".to_string(),
        related_entity_id: asset_id,
        related_asset_id: Some(asset_id),
        kind: "asset_assigned".to_string(),
        priority: "normal".to_string(),
        translations: vec![
            translation("en", "Asset assigned", "Asset Printer (PR-01) has been assigned to you."),
            translation("de", "Asset zugewiesen", "Asset Printer (PR-01) wurde Ihnen zugewiesen."),
            translation("fr", "Actif attribué", "L'actif Printer (PR-01) vous a été attribué."),
        ],
    }
}

// ---------------------------------------------------------------------------
// Test: Transactional create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_persists_full_translation_set(pool: PgPool) {
    let user = new_user(&pool, "Ada Lovelace", "ada@depot.io").await;
    let asset = new_asset(&pool, "PR-01").await;

    let id = NotificationRepo::create(&pool, &assigned_notification(user, asset))
        .await
        .unwrap();

    let row = NotificationRepo::find_by_id(&pool, id)
        .await
        .unwrap()
        .expect("created notification should exist");
    assert_eq!(row.recipient_user_id, user);
    assert_eq!(row.related_entity_type, "asset");
    assert_eq!(row.related_asset_id, Some(asset));
    assert_eq!(row.kind, "asset_assigned");
    assert_eq!(row.priority, "normal");
    assert!(!row.is_read);
    assert!(row.read_at.is_none());

    let count: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM notification_translations WHERE notification_id = $1",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count.0, 3, "one translation per supported locale");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_rolls_back_on_duplicate_locale(pool: PgPool) {
    let user = new_user(&pool, "Grace Hopper", "grace@depot.io").await;
    let asset = new_asset(&pool, "PR-02").await;

    let mut input = assigned_notification(user, asset);
    input.translations.push(translation("en", "Dup", "Duplicate English wording."));

    let result = NotificationRepo::create(&pool, &input).await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));

    // Nothing from the failed create may remain.
    let notifications: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notifications")
        .fetch_one(&pool)
        .await
        .unwrap();
    let translations: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notification_translations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(notifications.0, 0);
    assert_eq!(translations.0, 0);
}

// ---------------------------------------------------------------------------
// Test: Locale-scoped listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_list_returns_one_wording_in_the_requested_locale(pool: PgPool) {
    let user = new_user(&pool, "Alan Turing", "alan@depot.io").await;
    let asset = new_asset(&pool, "PR-03").await;
    NotificationRepo::create(&pool, &assigned_notification(user, asset))
        .await
        .unwrap();

    let en = NotificationRepo::list_for_user(&pool, user, "en", false, 50, 0)
        .await
        .unwrap();
    assert_eq!(en.len(), 1);
    assert_eq!(en[0].locale, "en");
    assert_eq!(en[0].title, "Asset assigned");

    let de = NotificationRepo::list_for_user(&pool, user, "de", false, 50, 0)
        .await
        .unwrap();
    assert_eq!(de.len(), 1);
    assert_eq!(de[0].title, "Asset zugewiesen");
    assert_eq!(de[0].id, en[0].id, "same notification, different wording");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_scopes_to_recipient_and_read_state(pool: PgPool) {
    let alice = new_user(&pool, "Alice", "alice@depot.io").await;
    let bob = new_user(&pool, "Bob", "bob@depot.io").await;
    let asset = new_asset(&pool, "PR-04").await;

    let first = NotificationRepo::create(&pool, &assigned_notification(alice, asset))
        .await
        .unwrap();
    NotificationRepo::create(&pool, &assigned_notification(alice, asset))
        .await
        .unwrap();
    NotificationRepo::create(&pool, &assigned_notification(bob, asset))
        .await
        .unwrap();

    let all = NotificationRepo::list_for_user(&pool, alice, "en", false, 50, 0)
        .await
        .unwrap();
    assert_eq!(all.len(), 2, "only Alice's notifications");

    let marked = NotificationRepo::mark_read(&pool, first, alice).await.unwrap();
    assert!(marked);

    let unread = NotificationRepo::list_for_user(&pool, alice, "en", true, 50, 0)
        .await
        .unwrap();
    assert_eq!(unread.len(), 1);
    assert!(unread.iter().all(|n| !n.is_read));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_pagination_is_newest_first(pool: PgPool) {
    let user = new_user(&pool, "Carol", "carol@depot.io").await;
    let asset = new_asset(&pool, "PR-05").await;

    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(
            NotificationRepo::create(&pool, &assigned_notification(user, asset))
                .await
                .unwrap(),
        );
    }

    let page1 = NotificationRepo::list_for_user(&pool, user, "en", false, 2, 0)
        .await
        .unwrap();
    let page2 = NotificationRepo::list_for_user(&pool, user, "en", false, 2, 2)
        .await
        .unwrap();

    assert_eq!(page1.len(), 2);
    assert_eq!(page2.len(), 1);
    // Newest first; inserts share a timestamp granularity so the id
    // tiebreaker keeps the order stable.
    assert_eq!(page1[0].id, ids[2]);
    assert_eq!(page1[1].id, ids[1]);
    assert_eq!(page2[0].id, ids[0]);
}

// ---------------------------------------------------------------------------
// Test: Read-state transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_read_is_scoped_and_idempotent(pool: PgPool) {
    let alice = new_user(&pool, "Alice", "alice@depot.io").await;
    let mallory = new_user(&pool, "Mallory", "mallory@depot.io").await;
    let asset = new_asset(&pool, "PR-06").await;
    let id = NotificationRepo::create(&pool, &assigned_notification(alice, asset))
        .await
        .unwrap();

    // Another user cannot mark it.
    assert!(!NotificationRepo::mark_read(&pool, id, mallory).await.unwrap());

    assert!(NotificationRepo::mark_read(&pool, id, alice).await.unwrap());
    let row = NotificationRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(row.is_read);
    assert!(row.read_at.is_some());

    // Already read: no rows affected.
    assert!(!NotificationRepo::mark_read(&pool, id, alice).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_all_read_and_unread_count(pool: PgPool) {
    let user = new_user(&pool, "Dave", "dave@depot.io").await;
    let asset = new_asset(&pool, "PR-07").await;
    for _ in 0..2 {
        NotificationRepo::create(&pool, &assigned_notification(user, asset))
            .await
            .unwrap();
    }

    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 2);

    let updated = NotificationRepo::mark_all_read(&pool, user).await.unwrap();
    assert_eq!(updated, 2);
    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 0);

    // Second pass has nothing left to mark.
    assert_eq!(NotificationRepo::mark_all_read(&pool, user).await.unwrap(), 0);
}
