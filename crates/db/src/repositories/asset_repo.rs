//! Repository for the `assets` table.
//!
//! Besides CRUD this hosts the two warranty deadline scans. The scan
//! queries compare against `CURRENT_DATE` so the database clock decides
//! window membership, not the application clock.

use depot_core::asset::{AssetCondition, AssetStatus};
use depot_core::types::DbId;
use sqlx::PgPool;

use crate::models::asset::{Asset, CreateAsset, UpdateAsset, WarrantyDeadline};

/// Shared `assets` column list.
const COLUMNS: &str =
    "id, asset_tag, name, status, condition, assigned_to, warranty_expires_on, \
     created_at, updated_at";

/// Persistence and warranty deadline scans for assets.
pub struct AssetRepo;

impl AssetRepo {
    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Insert an asset, returning the row as stored.
    pub async fn create(pool: &PgPool, input: &CreateAsset) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (asset_tag, name, status, condition, assigned_to, \
                                 warranty_expires_on)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(&input.asset_tag)
            .bind(&input.name)
            .bind(input.status.as_str())
            .bind(input.condition.as_str())
            .bind(input.assigned_to)
            .bind(input.warranty_expires_on)
            .fetch_one(pool)
            .await
    }

    /// Look up an asset by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update an asset. Plain `None` fields are left unchanged; the two
    /// nullable columns go through an explicit touched flag so storing
    /// `NULL` stays distinguishable from "no change".
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAsset,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET
                name = COALESCE($2, name),
                status = COALESCE($3, status),
                condition = COALESCE($4, condition),
                assigned_to = CASE WHEN $5 THEN $6 ELSE assigned_to END,
                warranty_expires_on = CASE WHEN $7 THEN $8 ELSE warranty_expires_on END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.status.map(AssetStatus::as_str))
            .bind(input.condition.map(AssetCondition::as_str))
            .bind(input.assigned_to.is_some())
            .bind(input.assigned_to.flatten())
            .bind(input.warranty_expires_on.is_some())
            .bind(input.warranty_expires_on.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Fetch the name and tag pair used for message placeholders.
    pub async fn label(pool: &PgPool, id: DbId) -> Result<Option<(String, String)>, sqlx::Error> {
        sqlx::query_as("SELECT name, asset_tag FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Deadline scans
    // -----------------------------------------------------------------------

    /// Assets whose warranty expires between today and `days` days out,
    /// both ends inclusive.
    ///
    /// Unassigned rows are included; the caller decides what an assignee
    /// is required for.
    pub async fn warranty_due_within(
        pool: &PgPool,
        days: i32,
    ) -> Result<Vec<WarrantyDeadline>, sqlx::Error> {
        sqlx::query_as::<_, WarrantyDeadline>(
            "SELECT id AS asset_id, assigned_to, warranty_expires_on AS expires_on
             FROM assets
             WHERE warranty_expires_on BETWEEN CURRENT_DATE AND CURRENT_DATE + $1
             ORDER BY warranty_expires_on, id",
        )
        .bind(days)
        .fetch_all(pool)
        .await
    }

    /// Assets whose warranty has already expired. Disposed and lost
    /// assets are out of service and never flagged.
    pub async fn warranty_expired(pool: &PgPool) -> Result<Vec<WarrantyDeadline>, sqlx::Error> {
        sqlx::query_as::<_, WarrantyDeadline>(
            "SELECT id AS asset_id, assigned_to, warranty_expires_on AS expires_on
             FROM assets
             WHERE warranty_expires_on < CURRENT_DATE
               AND status NOT IN ($1, $2)
             ORDER BY warranty_expires_on, id",
        )
        .bind(AssetStatus::Disposed.as_str())
        .bind(AssetStatus::Lost.as_str())
        .fetch_all(pool)
        .await
    }
}
