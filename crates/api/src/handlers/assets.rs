//! Asset read and update handlers.
//!
//! The update handler is the entry point for transition-driven
//! notifications: it compares the row before and after the write and
//! enqueues whatever intents the comparison yields. Enqueueing never
//! blocks and never fails the request.

use axum::extract::{Path, State};
use axum::Json;
use depot_core::error::CoreError;
use depot_core::{transition, DbId};
use depot_db::models::asset::UpdateAsset;
use depot_db::repositories::AssetRepo;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::extract::UserContext;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /api/v1/assets/{id}
// ---------------------------------------------------------------------------

/// Fetch a single asset by ID.
pub async fn get_asset(
    _user: UserContext,
    State(state): State<AppState>,
    Path(asset_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let asset = AssetRepo::find_by_id(&state.pool, asset_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id: asset_id,
        }))?;

    Ok(Json(json!({ "data": asset })))
}

// ---------------------------------------------------------------------------
// PUT /api/v1/assets/{id}
// ---------------------------------------------------------------------------

/// Partially update an asset.
///
/// Absent fields are left unchanged. `assigned_to` and
/// `warranty_expires_on` accept an explicit `null` to clear the column;
/// omitting them keeps the stored value, so the two cases stay distinct.
///
/// After a successful write, the before/after pair runs through
/// transition detection and each resulting intent is handed to the
/// dispatcher. The response reflects the update alone; notification
/// persistence happens on the worker pool.
pub async fn update_asset(
    _user: UserContext,
    State(state): State<AppState>,
    Path(asset_id): Path<DbId>,
    Json(input): Json<UpdateAsset>,
) -> AppResult<Json<serde_json::Value>> {
    let before = AssetRepo::find_by_id(&state.pool, asset_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id: asset_id,
        }))?;

    let touched = input.touched();
    let updated = AssetRepo::update(&state.pool, asset_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id: asset_id,
        }))?;

    match (before.snapshot(), updated.snapshot()) {
        (Some(before_snapshot), Some(after_snapshot)) => {
            for intent in transition::detect(&before_snapshot, &after_snapshot, touched) {
                state.dispatcher.enqueue(intent);
            }
        }
        _ => {
            // Rows predating the current status/condition vocabulary
            // still update fine; they just produce no notifications.
            tracing::warn!(
                asset_id,
                "unknown status or condition on asset row, skipping transition detection"
            );
        }
    }

    Ok(Json(json!({ "data": updated })))
}
