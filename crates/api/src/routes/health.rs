//! Service health probe.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of the health probe.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` while the database answers, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether `SELECT 1` against the pool succeeded just now.
    pub db_healthy: bool,
    /// Dispatch counters, exposed for operators watching for drops.
    pub queue: QueueCounters,
}

/// Queue counter snapshot inside [`HealthResponse`].
#[derive(Serialize)]
pub struct QueueCounters {
    pub enqueued: u64,
    pub delivered: u64,
    pub failed: u64,
    pub dropped: u64,
}

/// GET /health -- service, database, and dispatch queue health in one
/// probe. Mounted at the root, outside `/api/v1`, and unauthenticated.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = depot_db::health_check(&state.pool).await.is_ok();
    let counts = state.dispatcher.stats();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        queue: QueueCounters {
            enqueued: counts.enqueued,
            delivered: counts.delivered,
            failed: counts.failed,
            dropped: counts.dropped,
        },
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
