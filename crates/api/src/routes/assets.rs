//! Route definitions for the `/assets` resource.
//!
//! All endpoints require a caller identity header.

use axum::routing::get;
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Routes mounted at `/assets`.
///
/// ```text
/// GET    /{id}   -> get_asset
/// PUT    /{id}   -> update_asset
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(assets::get_asset).put(assets::update_asset))
}
