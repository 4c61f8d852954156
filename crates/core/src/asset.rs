//! Asset lifecycle vocabulary and the snapshot the transition rules read.
//!
//! Statuses and conditions are closed sets stored as TEXT in the database;
//! the canonical strings here are the only values ever written. Rows parse
//! back through [`AssetStatus::parse`] / [`AssetCondition::parse`] at the
//! engine boundary.

use serde::{Deserialize, Serialize};

use crate::types::{Day, DbId};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Operational status of an asset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// In service.
    Active,
    /// Shelved, not deployed.
    InStorage,
    /// Pulled for maintenance.
    UnderMaintenance,
    /// Retired and written off.
    Disposed,
    /// Missing.
    Lost,
}

/// Every valid status, in display order.
pub const ALL_STATUSES: &[AssetStatus] = &[
    AssetStatus::Active,
    AssetStatus::InStorage,
    AssetStatus::UnderMaintenance,
    AssetStatus::Disposed,
    AssetStatus::Lost,
];

impl AssetStatus {
    /// Canonical storage string for this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InStorage => "in_storage",
            Self::UnderMaintenance => "under_maintenance",
            Self::Disposed => "disposed",
            Self::Lost => "lost",
        }
    }

    /// Parse a stored status string. Returns `None` for anything outside
    /// the closed set.
    pub fn parse(value: &str) -> Option<Self> {
        ALL_STATUSES.iter().copied().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// Physical condition of an asset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCondition {
    New,
    Good,
    Fair,
    Poor,
    Damaged,
}

/// Every valid condition, best to worst.
pub const ALL_CONDITIONS: &[AssetCondition] = &[
    AssetCondition::New,
    AssetCondition::Good,
    AssetCondition::Fair,
    AssetCondition::Poor,
    AssetCondition::Damaged,
];

impl AssetCondition {
    /// Canonical storage string for this condition.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::Damaged => "damaged",
        }
    }

    /// Parse a stored condition string. Returns `None` outside the set.
    pub fn parse(value: &str) -> Option<Self> {
        ALL_CONDITIONS.iter().copied().find(|c| c.as_str() == value)
    }
}

impl std::fmt::Display for AssetCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Snapshot + touched-field mask
// ---------------------------------------------------------------------------

/// The slice of asset state the transition rules compare.
///
/// Taken before and after a mutation; the detector never sees the row
/// itself, only these values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSnapshot {
    pub id: DbId,
    pub asset_tag: String,
    pub name: String,
    pub status: AssetStatus,
    pub condition: AssetCondition,
    pub assigned_to: Option<DbId>,
    pub warranty_expires_on: Option<Day>,
}

/// Which rule-relevant fields an update explicitly carried.
///
/// An untouched field never fires its rule, even if the stored value
/// changed through some other path in the same transaction.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TouchedFields {
    pub assignee: bool,
    pub status: bool,
    pub condition: bool,
}

impl TouchedFields {
    /// A mask with every rule-relevant field marked touched.
    pub const fn all() -> Self {
        Self {
            assignee: true,
            status: true,
            condition: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
