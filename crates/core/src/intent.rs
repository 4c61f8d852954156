//! Notification intents.
//!
//! An intent is the ephemeral product of a detection or scan: who to tell,
//! about what entity, and with which params. Intents are never persisted;
//! the dispatcher turns them into stored notifications.

use serde::{Deserialize, Serialize};

use crate::kind::{NotificationKind, Priority};
use crate::params::MessageParams;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Entity kind
// ---------------------------------------------------------------------------

/// What `entity_id` points at (the `related_entity_type` column).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Asset,
    MaintenanceSchedule,
}

impl EntityKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::MaintenanceSchedule => "maintenance_schedule",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asset" => Some(Self::Asset),
            "maintenance_schedule" => Some(Self::MaintenanceSchedule),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// A single notification to be rendered and persisted for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationIntent {
    pub recipient_user_id: DbId,
    pub entity_kind: EntityKind,
    /// Id of the entity the notification is about (asset id or schedule id,
    /// per `entity_kind`).
    pub entity_id: DbId,
    /// The asset involved, when there is one. For asset entities this
    /// duplicates `entity_id`; for schedules it names the schedule's asset.
    pub asset_id: Option<DbId>,
    pub kind: NotificationKind,
    pub priority: Priority,
    pub params: MessageParams,
}

impl NotificationIntent {
    /// Intent about an asset, at the kind's default priority.
    pub fn for_asset(
        recipient_user_id: DbId,
        asset_id: DbId,
        kind: NotificationKind,
        params: MessageParams,
    ) -> Self {
        Self {
            recipient_user_id,
            entity_kind: EntityKind::Asset,
            entity_id: asset_id,
            asset_id: Some(asset_id),
            kind,
            priority: kind.default_priority(),
            params,
        }
    }

    /// Intent about a maintenance schedule, at the kind's default priority.
    pub fn for_maintenance_schedule(
        recipient_user_id: DbId,
        schedule_id: DbId,
        asset_id: DbId,
        kind: NotificationKind,
        params: MessageParams,
    ) -> Self {
        Self {
            recipient_user_id,
            entity_kind: EntityKind::MaintenanceSchedule,
            entity_id: schedule_id,
            asset_id: Some(asset_id),
            kind,
            priority: kind.default_priority(),
            params,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
