//! Maintenance schedule models.

use depot_core::types::{Day, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Schedule status strings as stored in `maintenance_schedules.status`.
pub const STATUS_OUTSTANDING: &str = "outstanding";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// A row from the `maintenance_schedules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceSchedule {
    pub id: DbId,
    pub asset_id: DbId,
    pub title: String,
    pub scheduled_on: Day,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a maintenance schedule. New schedules start
/// outstanding.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSchedule {
    pub asset_id: DbId,
    pub title: String,
    pub scheduled_on: Day,
}

/// Thin row returned by the maintenance scan queries. `assigned_to`
/// comes from the joined asset.
#[derive(Debug, Clone, FromRow)]
pub struct MaintenanceDeadline {
    pub schedule_id: DbId,
    pub asset_id: DbId,
    pub assigned_to: Option<DbId>,
    pub scheduled_on: Day,
}
