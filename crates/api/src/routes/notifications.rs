//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require a caller identity header.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /               -> list_notifications
/// POST   /read-all       -> mark_all_read
/// GET    /unread-count   -> unread_count
/// POST   /{id}/read      -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list_notifications))
        .route("/read-all", post(notifications::mark_all_read))
        .route("/unread-count", get(notifications::unread_count))
        .route("/{id}/read", post(notifications::mark_read))
}
