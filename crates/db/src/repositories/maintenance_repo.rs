//! Repository for the `maintenance_schedules` table.
//!
//! The deadline scans join `assets` for the assignee, because a schedule
//! notifies whoever currently holds the asset. Only outstanding schedules
//! are ever scanned.

use depot_core::types::DbId;
use sqlx::PgPool;

use crate::models::maintenance::{
    CreateSchedule, MaintenanceDeadline, MaintenanceSchedule, STATUS_OUTSTANDING,
};

/// Shared `maintenance_schedules` column list.
const COLUMNS: &str = "id, asset_id, title, scheduled_on, status, created_at, updated_at";

/// Persistence and deadline scans for maintenance schedules.
pub struct MaintenanceRepo;

impl MaintenanceRepo {
    /// Insert a schedule, returning the row as stored.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSchedule,
    ) -> Result<MaintenanceSchedule, sqlx::Error> {
        let query = format!(
            "INSERT INTO maintenance_schedules (asset_id, title, scheduled_on)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceSchedule>(&query)
            .bind(input.asset_id)
            .bind(&input.title)
            .bind(input.scheduled_on)
            .fetch_one(pool)
            .await
    }

    /// Look up a schedule by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenanceSchedule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_schedules WHERE id = $1");
        sqlx::query_as::<_, MaintenanceSchedule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set a schedule's status. Returns `true` if the row was updated.
    pub async fn set_status(pool: &PgPool, id: DbId, status: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE maintenance_schedules SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Deadline scans
    // -----------------------------------------------------------------------

    /// Outstanding schedules due between today and `days` days out, both
    /// ends inclusive.
    pub async fn due_within(
        pool: &PgPool,
        days: i32,
    ) -> Result<Vec<MaintenanceDeadline>, sqlx::Error> {
        sqlx::query_as::<_, MaintenanceDeadline>(
            "SELECT m.id AS schedule_id, m.asset_id, a.assigned_to, m.scheduled_on
             FROM maintenance_schedules m
             JOIN assets a ON a.id = m.asset_id
             WHERE m.status = $1
               AND m.scheduled_on BETWEEN CURRENT_DATE AND CURRENT_DATE + $2
             ORDER BY m.scheduled_on, m.id",
        )
        .bind(STATUS_OUTSTANDING)
        .bind(days)
        .fetch_all(pool)
        .await
    }

    /// Outstanding schedules whose date has already passed. Disjoint from
    /// [`MaintenanceRepo::due_within`], whose window starts at today.
    pub async fn overdue(pool: &PgPool) -> Result<Vec<MaintenanceDeadline>, sqlx::Error> {
        sqlx::query_as::<_, MaintenanceDeadline>(
            "SELECT m.id AS schedule_id, m.asset_id, a.assigned_to, m.scheduled_on
             FROM maintenance_schedules m
             JOIN assets a ON a.id = m.asset_id
             WHERE m.status = $1
               AND m.scheduled_on < CURRENT_DATE
             ORDER BY m.scheduled_on, m.id",
        )
        .bind(STATUS_OUTSTANDING)
        .fetch_all(pool)
        .await
    }
}
