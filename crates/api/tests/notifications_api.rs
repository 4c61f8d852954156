//! HTTP-level integration tests for the notification read API.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get, get_anon, post};
use depot_db::models::notification::{CreateNotification, CreateTranslation};
use depot_db::repositories::{NotificationRepo, UserRepo};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, name: &str, email: &str) -> i64 {
    UserRepo::create(pool, name, email).await.unwrap().id
}

fn translation(locale: &str, title: &str, message: &str) -> CreateTranslation {
    CreateTranslation {
        locale: locale.to_string(),
        title: title.to_string(),
        message: message.to_string(),
    }
}

/// Insert a notification with one translation per supported locale, worded
/// distinctly enough to tell the locales apart in assertions.
async fn seed_notification(pool: &PgPool, recipient: i64, kind: &str) -> i64 {
    let input = CreateNotification {
        recipient_user_id: recipient,
        related_entity_type: "asset".to_string(),
        related_entity_id: 1,
        related_asset_id: None,
        kind: kind.to_string(),
        priority: "normal".to_string(),
        translations: vec![
            translation("en", "Asset update", "The asset changed."),
            translation("de", "Geräte-Update", "Das Gerät wurde geändert."),
            translation("fr", "Mise à jour du matériel", "Le matériel a changé."),
        ],
    };
    NotificationRepo::create(pool, &input).await.unwrap()
}

// ---------------------------------------------------------------------------
// Identity header
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_identity_header_returns_401(pool: PgPool) {
    let (app, _dispatcher) = common::build_test_app(pool);
    let response = get_anon(app, "/api/v1/notifications").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_identity_header_returns_401(pool: PgPool) {
    let (app, _dispatcher) = common::build_test_app(pool);

    let request = Request::builder()
        .uri("/api/v1/notifications")
        .header("x-user-id", "not-a-number")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_returns_requested_locale_newest_first(pool: PgPool) {
    let user = seed_user(&pool, "Erika Musterfrau", "erika@example.com").await;
    let first = seed_notification(&pool, user, "asset_assigned").await;
    let second = seed_notification(&pool, user, "asset_reassigned").await;

    let (app, _dispatcher) = common::build_test_app(pool);
    let response = get(app, "/api/v1/notifications?locale=de", user).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);

    // Newest first.
    assert_eq!(data[0]["id"].as_i64(), Some(second));
    assert_eq!(data[1]["id"].as_i64(), Some(first));

    // Each item carries the requested locale's wording only.
    assert_eq!(data[0]["locale"], "de");
    assert_eq!(data[0]["title"], "Geräte-Update");
    assert_eq!(data[0]["kind"], "asset_reassigned");
    assert_eq!(data[0]["is_read"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn locale_region_and_case_are_normalized(pool: PgPool) {
    let user = seed_user(&pool, "Erika Musterfrau", "erika@example.com").await;
    seed_notification(&pool, user, "asset_assigned").await;

    let (app, _dispatcher) = common::build_test_app(pool);
    let response = get(app, "/api/v1/notifications?locale=DE-at", user).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["locale"], "de");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_locale_falls_back_to_english(pool: PgPool) {
    let user = seed_user(&pool, "Erika Musterfrau", "erika@example.com").await;
    seed_notification(&pool, user, "asset_assigned").await;

    let (app, _dispatcher) = common::build_test_app(pool);
    let response = get(app, "/api/v1/notifications?locale=xx", user).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["locale"], "en");
    assert_eq!(data[0]["title"], "Asset update");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unread_only_filters_read_rows(pool: PgPool) {
    let user = seed_user(&pool, "Erika Musterfrau", "erika@example.com").await;
    let read = seed_notification(&pool, user, "asset_assigned").await;
    let unread = seed_notification(&pool, user, "asset_reassigned").await;
    assert!(NotificationRepo::mark_read(&pool, read, user).await.unwrap());

    let (app, _dispatcher) = common::build_test_app(pool);
    let response = get(app, "/api/v1/notifications?unread_only=true", user).await;

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"].as_i64(), Some(unread));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn limit_and_offset_page_through_the_list(pool: PgPool) {
    let user = seed_user(&pool, "Erika Musterfrau", "erika@example.com").await;
    seed_notification(&pool, user, "asset_assigned").await;
    let middle = seed_notification(&pool, user, "asset_reassigned").await;
    seed_notification(&pool, user, "asset_unassigned").await;

    let (app, _dispatcher) = common::build_test_app(pool);
    let response = get(app, "/api/v1/notifications?limit=1&offset=1", user).await;

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"].as_i64(), Some(middle));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rows_of_other_users_are_invisible(pool: PgPool) {
    let owner = seed_user(&pool, "Erika Musterfrau", "erika@example.com").await;
    let stranger = seed_user(&pool, "Max Mustermann", "max@example.com").await;
    let notification = seed_notification(&pool, owner, "asset_assigned").await;

    let (app, _dispatcher) = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/notifications", stranger).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let response = post(
        app,
        &format!("/api/v1/notifications/{notification}/read"),
        stranger,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Read-state changes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn mark_read_drops_the_unread_count_and_is_idempotent(pool: PgPool) {
    let user = seed_user(&pool, "Erika Musterfrau", "erika@example.com").await;
    let notification = seed_notification(&pool, user, "asset_assigned").await;

    let (app, _dispatcher) = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/notifications/unread-count", user).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 1);

    let uri = format!("/api/v1/notifications/{notification}/read");
    let response = post(app.clone(), &uri, user).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), "/api/v1/notifications/unread-count", user).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 0);

    // Marking an already-read notification is still a success.
    let response = post(app.clone(), &uri, user).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, "/api/v1/notifications?unread_only=false", user).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["is_read"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn mark_read_unknown_id_returns_404(pool: PgPool) {
    let user = seed_user(&pool, "Erika Musterfrau", "erika@example.com").await;

    let (app, _dispatcher) = common::build_test_app(pool);
    let response = post(app, "/api/v1/notifications/999999/read", user).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn read_all_marks_only_the_callers_rows(pool: PgPool) {
    let user = seed_user(&pool, "Erika Musterfrau", "erika@example.com").await;
    let other = seed_user(&pool, "Max Mustermann", "max@example.com").await;
    seed_notification(&pool, user, "asset_assigned").await;
    seed_notification(&pool, user, "asset_reassigned").await;
    seed_notification(&pool, user, "warranty_expired").await;
    seed_notification(&pool, other, "asset_assigned").await;

    let (app, _dispatcher) = common::build_test_app(pool);

    let response = post(app.clone(), "/api/v1/notifications/read-all", user).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["marked_read"], 3);

    let response = get(app.clone(), "/api/v1/notifications/unread-count", user).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 0);

    // The other user's row is untouched.
    let response = get(app.clone(), "/api/v1/notifications/unread-count", other).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 1);

    // A second pass finds nothing left to mark.
    let response = post(app, "/api/v1/notifications/read-all", user).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["marked_read"], 0);
}
