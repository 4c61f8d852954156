//! Notification kinds and their catalog wiring.
//!
//! Each kind is a row in a static table: the storage string, the catalog
//! key pair its text renders from, a default priority, and the exact set
//! of placeholder params its templates may reference. Adding a kind means
//! extending every match here plus the builtin catalog.

use serde::{Deserialize, Serialize};

use crate::params::ParamKey;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Delivery priority surfaced to clients. Not a queueing concept; the
/// dispatcher treats all intents alike.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Normal,
    High,
}

impl Priority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(Self::Normal),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// Everything the engine can notify about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    // Assignment transitions
    AssetAssigned,
    AssetReassigned,
    AssetUnassigned,
    // Status transitions
    AssetActivated,
    AssetUnderMaintenance,
    AssetDisposed,
    AssetLost,
    AssetStatusChanged,
    // Condition transitions
    AssetConditionDamaged,
    AssetConditionPoor,
    AssetConditionChanged,
    // Deadline scans
    WarrantyExpiringSoon,
    WarrantyExpired,
    MaintenanceDueSoon,
    MaintenanceOverdue,
}

/// Every kind, grouped the way the variants are declared.
pub const ALL_KINDS: &[NotificationKind] = &[
    NotificationKind::AssetAssigned,
    NotificationKind::AssetReassigned,
    NotificationKind::AssetUnassigned,
    NotificationKind::AssetActivated,
    NotificationKind::AssetUnderMaintenance,
    NotificationKind::AssetDisposed,
    NotificationKind::AssetLost,
    NotificationKind::AssetStatusChanged,
    NotificationKind::AssetConditionDamaged,
    NotificationKind::AssetConditionPoor,
    NotificationKind::AssetConditionChanged,
    NotificationKind::WarrantyExpiringSoon,
    NotificationKind::WarrantyExpired,
    NotificationKind::MaintenanceDueSoon,
    NotificationKind::MaintenanceOverdue,
];

impl NotificationKind {
    /// Canonical storage string (the `kind` TEXT column).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AssetAssigned => "asset_assigned",
            Self::AssetReassigned => "asset_reassigned",
            Self::AssetUnassigned => "asset_unassigned",
            Self::AssetActivated => "asset_activated",
            Self::AssetUnderMaintenance => "asset_under_maintenance",
            Self::AssetDisposed => "asset_disposed",
            Self::AssetLost => "asset_lost",
            Self::AssetStatusChanged => "asset_status_changed",
            Self::AssetConditionDamaged => "asset_condition_damaged",
            Self::AssetConditionPoor => "asset_condition_poor",
            Self::AssetConditionChanged => "asset_condition_changed",
            Self::WarrantyExpiringSoon => "warranty_expiring_soon",
            Self::WarrantyExpired => "warranty_expired",
            Self::MaintenanceDueSoon => "maintenance_due_soon",
            Self::MaintenanceOverdue => "maintenance_overdue",
        }
    }

    /// Parse a stored kind string. `None` for anything outside the set.
    pub fn parse(value: &str) -> Option<Self> {
        ALL_KINDS.iter().copied().find(|k| k.as_str() == value)
    }

    /// Catalog key for the notification title.
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::AssetAssigned => "asset.assigned.title",
            Self::AssetReassigned => "asset.reassigned.title",
            Self::AssetUnassigned => "asset.unassigned.title",
            Self::AssetActivated => "asset.activated.title",
            Self::AssetUnderMaintenance => "asset.under_maintenance.title",
            Self::AssetDisposed => "asset.disposed.title",
            Self::AssetLost => "asset.lost.title",
            Self::AssetStatusChanged => "asset.status_changed.title",
            Self::AssetConditionDamaged => "asset.condition_damaged.title",
            Self::AssetConditionPoor => "asset.condition_poor.title",
            Self::AssetConditionChanged => "asset.condition_changed.title",
            Self::WarrantyExpiringSoon => "warranty.expiring_soon.title",
            Self::WarrantyExpired => "warranty.expired.title",
            Self::MaintenanceDueSoon => "maintenance.due_soon.title",
            Self::MaintenanceOverdue => "maintenance.overdue.title",
        }
    }

    /// Catalog key for the notification body.
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::AssetAssigned => "asset.assigned.message",
            Self::AssetReassigned => "asset.reassigned.message",
            Self::AssetUnassigned => "asset.unassigned.message",
            Self::AssetActivated => "asset.activated.message",
            Self::AssetUnderMaintenance => "asset.under_maintenance.message",
            Self::AssetDisposed => "asset.disposed.message",
            Self::AssetLost => "asset.lost.message",
            Self::AssetStatusChanged => "asset.status_changed.message",
            Self::AssetConditionDamaged => "asset.condition_damaged.message",
            Self::AssetConditionPoor => "asset.condition_poor.message",
            Self::AssetConditionChanged => "asset.condition_changed.message",
            Self::WarrantyExpiringSoon => "warranty.expiring_soon.message",
            Self::WarrantyExpired => "warranty.expired.message",
            Self::MaintenanceDueSoon => "maintenance.due_soon.message",
            Self::MaintenanceOverdue => "maintenance.overdue.message",
        }
    }

    /// Priority an intent of this kind carries unless a rule overrides it.
    pub const fn default_priority(self) -> Priority {
        match self {
            Self::AssetDisposed
            | Self::AssetLost
            | Self::AssetConditionDamaged
            | Self::WarrantyExpired
            | Self::MaintenanceOverdue => Priority::High,
            _ => Priority::Normal,
        }
    }

    /// The params this kind's templates may reference. Intents built by the
    /// engine carry exactly these keys (name lookups may leave gaps).
    pub const fn params(self) -> &'static [ParamKey] {
        match self {
            Self::AssetAssigned | Self::AssetReassigned => {
                &[ParamKey::AssetName, ParamKey::AssetTag, ParamKey::UserName]
            }
            Self::AssetUnassigned
            | Self::AssetActivated
            | Self::AssetUnderMaintenance
            | Self::AssetDisposed
            | Self::AssetLost
            | Self::AssetConditionDamaged
            | Self::AssetConditionPoor => &[ParamKey::AssetName, ParamKey::AssetTag],
            Self::AssetStatusChanged => &[
                ParamKey::AssetName,
                ParamKey::AssetTag,
                ParamKey::OldStatus,
                ParamKey::NewStatus,
            ],
            Self::AssetConditionChanged => &[
                ParamKey::AssetName,
                ParamKey::AssetTag,
                ParamKey::OldCondition,
                ParamKey::NewCondition,
            ],
            Self::WarrantyExpiringSoon | Self::MaintenanceDueSoon => &[
                ParamKey::AssetName,
                ParamKey::AssetTag,
                ParamKey::DueDate,
                ParamKey::Days,
            ],
            Self::WarrantyExpired | Self::MaintenanceOverdue => {
                &[ParamKey::AssetName, ParamKey::AssetTag, ParamKey::DueDate]
            }
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
