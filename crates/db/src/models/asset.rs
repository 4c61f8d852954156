//! Asset entity models and DTOs.

use depot_core::asset::{AssetCondition, AssetSnapshot, AssetStatus, TouchedFields};
use depot_core::types::{Day, DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub asset_tag: String,
    pub name: String,
    pub status: String,
    pub condition: String,
    pub assigned_to: Option<DbId>,
    pub warranty_expires_on: Option<Day>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Asset {
    /// The typed snapshot the transition rules consume.
    ///
    /// `None` if the stored status/condition strings fall outside the
    /// core enums; the CHECK constraints make that unreachable through
    /// this crate's writes.
    pub fn snapshot(&self) -> Option<AssetSnapshot> {
        Some(AssetSnapshot {
            id: self.id,
            asset_tag: self.asset_tag.clone(),
            name: self.name.clone(),
            status: AssetStatus::parse(&self.status)?,
            condition: AssetCondition::parse(&self.condition)?,
            assigned_to: self.assigned_to,
            warranty_expires_on: self.warranty_expires_on,
        })
    }
}

/// Thin row returned by the warranty scan queries.
#[derive(Debug, Clone, FromRow)]
pub struct WarrantyDeadline {
    pub asset_id: DbId,
    pub assigned_to: Option<DbId>,
    pub expires_on: Day,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating an asset.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAsset {
    pub asset_tag: String,
    pub name: String,
    pub status: AssetStatus,
    pub condition: AssetCondition,
    pub assigned_to: Option<DbId>,
    pub warranty_expires_on: Option<Day>,
}

/// DTO for partially updating an asset.
///
/// `assigned_to` and `warranty_expires_on` are nullable columns and use
/// the double-`Option`: field absent = leave unchanged, explicit `null`
/// = clear, value = set. [`UpdateAsset::touched`] reports which
/// transition-relevant fields the payload explicitly carried.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAsset {
    pub name: Option<String>,
    pub status: Option<AssetStatus>,
    pub condition: Option<AssetCondition>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub warranty_expires_on: Option<Option<Day>>,
}

impl UpdateAsset {
    pub fn touched(&self) -> TouchedFields {
        TouchedFields {
            assignee: self.assigned_to.is_some(),
            status: self.status.is_some(),
            condition: self.condition.is_some(),
        }
    }
}

/// Deserialize a present-but-possibly-null field into `Some(inner)`;
/// serde's `default` covers the absent case with `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
