//! Postgres adapters for the notification engine's storage ports.
//!
//! `depot_notify` is storage-agnostic; these thin wrappers close the loop
//! by implementing its port traits over the `depot_db` repositories. Each
//! adapter owns a pool clone so the engine can hold them for the lifetime
//! of the process.

use depot_core::scan::{MaintenanceRow, WarrantyRow};
use depot_core::DbId;
use depot_db::models::notification::{CreateNotification, CreateTranslation};
use depot_db::repositories::{AssetRepo, MaintenanceRepo, NotificationRepo, UserRepo};
use depot_db::DbPool;
use depot_notify::ports::{
    AssetLabel, DeadlineSource, DisplayNameSource, NewNotification, NotificationSink, PortError,
};

// ---------------------------------------------------------------------------
// Deadline queries
// ---------------------------------------------------------------------------

/// [`DeadlineSource`] backed by the asset and maintenance repositories.
#[derive(Clone)]
pub struct PgDeadlineSource {
    pool: DbPool,
}

impl PgDeadlineSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl DeadlineSource for PgDeadlineSource {
    async fn warranty_due_soon(&self, days: u32) -> Result<Vec<WarrantyRow>, PortError> {
        let rows = AssetRepo::warranty_due_within(&self.pool, days as i32).await?;
        Ok(rows
            .into_iter()
            .map(|row| WarrantyRow {
                asset_id: row.asset_id,
                assigned_to: row.assigned_to,
                expires_on: row.expires_on,
            })
            .collect())
    }

    async fn warranty_expired(&self) -> Result<Vec<WarrantyRow>, PortError> {
        let rows = AssetRepo::warranty_expired(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| WarrantyRow {
                asset_id: row.asset_id,
                assigned_to: row.assigned_to,
                expires_on: row.expires_on,
            })
            .collect())
    }

    async fn maintenance_due_soon(&self, days: u32) -> Result<Vec<MaintenanceRow>, PortError> {
        let rows = MaintenanceRepo::due_within(&self.pool, days as i32).await?;
        Ok(rows
            .into_iter()
            .map(|row| MaintenanceRow {
                schedule_id: row.schedule_id,
                asset_id: row.asset_id,
                assigned_to: row.assigned_to,
                scheduled_on: row.scheduled_on,
            })
            .collect())
    }

    async fn maintenance_overdue(&self) -> Result<Vec<MaintenanceRow>, PortError> {
        let rows = MaintenanceRepo::overdue(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| MaintenanceRow {
                schedule_id: row.schedule_id,
                asset_id: row.asset_id,
                assigned_to: row.assigned_to,
                scheduled_on: row.scheduled_on,
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Display names
// ---------------------------------------------------------------------------

/// [`DisplayNameSource`] backed by the asset and user repositories.
#[derive(Clone)]
pub struct PgDisplayNames {
    pool: DbPool,
}

impl PgDisplayNames {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl DisplayNameSource for PgDisplayNames {
    async fn asset_label(&self, asset_id: DbId) -> Result<Option<AssetLabel>, PortError> {
        let label = AssetRepo::label(&self.pool, asset_id).await?;
        Ok(label.map(|(name, asset_tag)| AssetLabel { name, asset_tag }))
    }

    async fn user_name(&self, user_id: DbId) -> Result<Option<String>, PortError> {
        Ok(UserRepo::display_name(&self.pool, user_id).await?)
    }
}

// ---------------------------------------------------------------------------
// Persistence sink
// ---------------------------------------------------------------------------

/// [`NotificationSink`] that persists through [`NotificationRepo::create`],
/// writing the envelope and all translations in one transaction.
#[derive(Clone)]
pub struct PgNotificationSink {
    pool: DbPool,
}

impl PgNotificationSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl NotificationSink for PgNotificationSink {
    async fn create(&self, notification: &NewNotification) -> Result<DbId, PortError> {
        let input = CreateNotification {
            recipient_user_id: notification.recipient_user_id,
            related_entity_type: notification.entity_kind.as_str().to_string(),
            related_entity_id: notification.entity_id,
            related_asset_id: notification.asset_id,
            kind: notification.kind.as_str().to_string(),
            priority: notification.priority.as_str().to_string(),
            translations: notification
                .translations
                .iter()
                .map(|t| CreateTranslation {
                    locale: t.locale.as_str().to_string(),
                    title: t.title.clone(),
                    message: t.message.clone(),
                })
                .collect(),
        };
        Ok(NotificationRepo::create(&self.pool, &input).await?)
    }
}
