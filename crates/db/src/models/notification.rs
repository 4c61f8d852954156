//! Notification models and DTOs.
//!
//! A notification row holds locale-independent facts; the wording lives
//! in `notification_translations`, one row per supported locale. Reads
//! join the two so a caller gets exactly one translation per hit.

use depot_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub recipient_user_id: DbId,
    pub related_entity_type: String,
    pub related_entity_id: DbId,
    pub related_asset_id: Option<DbId>,
    pub kind: String,
    pub priority: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `notification_translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationTranslation {
    pub id: DbId,
    pub notification_id: DbId,
    pub locale: String,
    pub title: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// Read model for the notification list: the notification joined with
/// the translation matching the requested locale.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LocalizedNotification {
    pub id: DbId,
    pub recipient_user_id: DbId,
    pub related_entity_type: String,
    pub related_entity_id: DbId,
    pub related_asset_id: Option<DbId>,
    pub kind: String,
    pub priority: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub locale: String,
    pub title: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a notification together with its translations.
///
/// The insert is transactional: either the notification and every
/// translation land, or nothing does.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub recipient_user_id: DbId,
    pub related_entity_type: String,
    pub related_entity_id: DbId,
    pub related_asset_id: Option<DbId>,
    pub kind: String,
    pub priority: String,
    pub translations: Vec<CreateTranslation>,
}

/// One localized wording for a notification being created.
#[derive(Debug, Clone)]
pub struct CreateTranslation {
    pub locale: String,
    pub title: String,
    pub message: String,
}
