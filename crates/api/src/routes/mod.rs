pub mod assets;
pub mod health;
pub mod notifications;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /assets/{id}                  get, update
///
/// /notifications                list (?locale, unread_only, limit, offset)
/// /notifications/read-all       mark all read (POST)
/// /notifications/unread-count   unread count (GET)
/// /notifications/{id}/read      mark read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Asset lookup and the update entry point for change notifications.
        .nest("/assets", assets::router())
        // Localized notification read API.
        .nest("/notifications", notifications::router())
}
