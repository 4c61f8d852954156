//! Notification read API.
//!
//! Every endpoint answers for the caller identified by [`UserContext`]
//! alone; other users' rows are indistinguishable from absent ones.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use depot_core::error::CoreError;
use depot_core::{DbId, Locale};
use depot_db::repositories::NotificationRepo;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::extract::UserContext;
use crate::state::AppState;

/// Hard cap on page size.
const MAX_LIMIT: i64 = 100;
/// Page size when the query names none.
const DEFAULT_LIMIT: i64 = 50;

/// Query string of `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Locale tag such as `de` or `de-AT`; unknown tags read as the
    /// default locale.
    pub locale: Option<String>,
    /// Restrict to unread rows.
    pub unread_only: Option<bool>,
    /// Page size, clamped to [`MAX_LIMIT`].
    pub limit: Option<i64>,
    /// Rows to skip before the page starts.
    pub offset: Option<i64>,
}

impl ListQuery {
    fn locale(&self) -> Locale {
        Locale::parse_or_default(self.locale.as_deref().unwrap_or(""))
    }

    fn page(&self) -> (i64, i64) {
        (
            self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
            self.offset.unwrap_or(0),
        )
    }
}

/// GET /api/v1/notifications -- the caller's notifications, newest
/// first, one wording per row in the requested locale.
pub async fn list_notifications(
    user: UserContext,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let (limit, offset) = query.page();
    let rows = NotificationRepo::list_for_user(
        &state.pool,
        user.user_id,
        query.locale().as_str(),
        query.unread_only.unwrap_or(false),
        limit,
        offset,
    )
    .await?;

    Ok(Json(json!({ "data": rows })))
}

/// POST /api/v1/notifications/{id}/read -- mark one notification read.
///
/// 204 on success, already-read included; 404 when the id does not exist
/// for this caller.
pub async fn mark_read(
    user: UserContext,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let flipped = NotificationRepo::mark_read(&state.pool, notification_id, user.user_id).await?;
    if !flipped && !owns_notification(&state, notification_id, user.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// The repo only flips unread rows; this resolves whether a miss meant
/// "already read" or "not yours / not there".
async fn owns_notification(
    state: &AppState,
    notification_id: DbId,
    user_id: DbId,
) -> Result<bool, sqlx::Error> {
    Ok(NotificationRepo::find_by_id(&state.pool, notification_id)
        .await?
        .is_some_and(|n| n.recipient_user_id == user_id))
}

/// POST /api/v1/notifications/read-all -- mark everything read, answering
/// with how many rows flipped.
pub async fn mark_all_read(
    user: UserContext,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let marked = NotificationRepo::mark_all_read(&state.pool, user.user_id).await?;
    Ok(Json(json!({ "data": { "marked_read": marked } })))
}

/// GET /api/v1/notifications/unread-count -- the caller's unread total.
pub async fn unread_count(
    user: UserContext,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::unread_count(&state.pool, user.user_id).await?;
    Ok(Json(json!({ "data": { "count": count } })))
}
