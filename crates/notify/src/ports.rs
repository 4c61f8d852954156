//! Storage ports the engine consumes.
//!
//! The engine never touches the database directly; the composition root
//! implements these traits over the repository layer and hands them in at
//! wiring time. Errors cross the boundary as boxed trait objects so the
//! engine stays storage-agnostic. Tests substitute in-memory fakes.

use depot_core::scan::{MaintenanceRow, WarrantyRow};
use depot_core::{DbId, EntityKind, NotificationKind, Priority};

use crate::render::LocalizedMessage;

/// Boxed, source-agnostic port error.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

// ---------------------------------------------------------------------------
// Deadline queries
// ---------------------------------------------------------------------------

/// Window queries behind the deadline scans. Each call carries its own
/// time filter; the engine never computes "today".
pub trait DeadlineSource: Send + Sync {
    /// Assets whose warranty expires within the next `days` days
    /// (today inclusive).
    fn warranty_due_soon(
        &self,
        days: u32,
    ) -> impl std::future::Future<Output = Result<Vec<WarrantyRow>, PortError>> + Send;

    /// Assets whose warranty has already expired, excluding disposed and
    /// lost ones.
    fn warranty_expired(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<WarrantyRow>, PortError>> + Send;

    /// Outstanding maintenance scheduled within the next `days` days
    /// (today inclusive).
    fn maintenance_due_soon(
        &self,
        days: u32,
    ) -> impl std::future::Future<Output = Result<Vec<MaintenanceRow>, PortError>> + Send;

    /// Outstanding maintenance whose scheduled date has passed.
    fn maintenance_overdue(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<MaintenanceRow>, PortError>> + Send;
}

// ---------------------------------------------------------------------------
// Display names
// ---------------------------------------------------------------------------

/// Name + tag pair shown in rendered messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLabel {
    pub name: String,
    pub asset_tag: String,
}

/// Resolves the display names an intent's params may be missing.
/// `Ok(None)` means the row is gone; either way the dispatcher renders
/// with whatever params it has.
pub trait DisplayNameSource: Send + Sync {
    fn asset_label(
        &self,
        asset_id: DbId,
    ) -> impl std::future::Future<Output = Result<Option<AssetLabel>, PortError>> + Send;

    fn user_name(
        &self,
        user_id: DbId,
    ) -> impl std::future::Future<Output = Result<Option<String>, PortError>> + Send;
}

// ---------------------------------------------------------------------------
// Persistence sink
// ---------------------------------------------------------------------------

/// A fully rendered notification ready to persist: the envelope plus one
/// translation per supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub recipient_user_id: DbId,
    pub entity_kind: EntityKind,
    pub entity_id: DbId,
    pub asset_id: Option<DbId>,
    pub kind: NotificationKind,
    pub priority: Priority,
    pub translations: Vec<LocalizedMessage>,
}

/// Where rendered notifications go. The dispatcher treats `create` as
/// best-effort; failures are counted and logged, never propagated.
pub trait NotificationSink: Send + Sync {
    fn create(
        &self,
        notification: &NewNotification,
    ) -> impl std::future::Future<Output = Result<DbId, PortError>> + Send;
}
