//! Deadline scan rows and their intent mappings.
//!
//! The storage layer runs the window queries and hands back these thin
//! rows; the functions here turn each row into an intent. Pure, like
//! [`crate::transition`]: a row with no assignee maps to `None` and is
//! skipped without error. Asset name/tag params are absent here — the
//! dispatcher resolves display names at delivery time.

use crate::intent::NotificationIntent;
use crate::kind::NotificationKind;
use crate::params::{MessageParams, ParamKey};
use crate::types::{Day, DbId};

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// An asset whose warranty fell inside a scan window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarrantyRow {
    pub asset_id: DbId,
    pub assigned_to: Option<DbId>,
    pub expires_on: Day,
}

/// An outstanding maintenance schedule inside a scan window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceRow {
    pub schedule_id: DbId,
    pub asset_id: DbId,
    pub assigned_to: Option<DbId>,
    pub scheduled_on: Day,
}

// ---------------------------------------------------------------------------
// Row -> intent
// ---------------------------------------------------------------------------

/// Warranty expiring within the scan window of `days`.
pub fn warranty_due_soon_intent(row: &WarrantyRow, days: u32) -> Option<NotificationIntent> {
    let recipient = row.assigned_to?;
    let params = MessageParams::new()
        .with(ParamKey::DueDate, row.expires_on.to_string())
        .with(ParamKey::Days, days.to_string());
    Some(NotificationIntent::for_asset(
        recipient,
        row.asset_id,
        NotificationKind::WarrantyExpiringSoon,
        params,
    ))
}

/// Warranty already past its expiry date.
pub fn warranty_expired_intent(row: &WarrantyRow) -> Option<NotificationIntent> {
    let recipient = row.assigned_to?;
    let params = MessageParams::new().with(ParamKey::DueDate, row.expires_on.to_string());
    Some(NotificationIntent::for_asset(
        recipient,
        row.asset_id,
        NotificationKind::WarrantyExpired,
        params,
    ))
}

/// Maintenance scheduled within the scan window of `days`.
pub fn maintenance_due_soon_intent(row: &MaintenanceRow, days: u32) -> Option<NotificationIntent> {
    let recipient = row.assigned_to?;
    let params = MessageParams::new()
        .with(ParamKey::DueDate, row.scheduled_on.to_string())
        .with(ParamKey::Days, days.to_string());
    Some(NotificationIntent::for_maintenance_schedule(
        recipient,
        row.schedule_id,
        row.asset_id,
        NotificationKind::MaintenanceDueSoon,
        params,
    ))
}

/// Maintenance still outstanding past its scheduled date.
pub fn maintenance_overdue_intent(row: &MaintenanceRow) -> Option<NotificationIntent> {
    let recipient = row.assigned_to?;
    let params = MessageParams::new().with(ParamKey::DueDate, row.scheduled_on.to_string());
    Some(NotificationIntent::for_maintenance_schedule(
        recipient,
        row.schedule_id,
        row.asset_id,
        NotificationKind::MaintenanceOverdue,
        params,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::EntityKind;
    use crate::kind::Priority;

    fn day(s: &str) -> Day {
        s.parse().unwrap()
    }

    #[test]
    fn warranty_due_soon_carries_date_and_window() {
        let row = WarrantyRow {
            asset_id: 42,
            assigned_to: Some(2),
            expires_on: day("2026-09-03"),
        };
        let intent = warranty_due_soon_intent(&row, 30).unwrap();
        assert_eq!(intent.kind, NotificationKind::WarrantyExpiringSoon);
        assert_eq!(intent.recipient_user_id, 2);
        assert_eq!(intent.entity_kind, EntityKind::Asset);
        assert_eq!(intent.entity_id, 42);
        assert_eq!(intent.params.get(ParamKey::DueDate), Some("2026-09-03"));
        assert_eq!(intent.params.get(ParamKey::Days), Some("30"));
        assert_eq!(intent.priority, Priority::Normal);
    }

    #[test]
    fn unassigned_rows_are_skipped() {
        let warranty = WarrantyRow {
            asset_id: 42,
            assigned_to: None,
            expires_on: day("2026-09-03"),
        };
        assert_eq!(warranty_due_soon_intent(&warranty, 30), None);
        assert_eq!(warranty_expired_intent(&warranty), None);

        let maintenance = MaintenanceRow {
            schedule_id: 9,
            asset_id: 42,
            assigned_to: None,
            scheduled_on: day("2026-08-23"),
        };
        assert_eq!(maintenance_due_soon_intent(&maintenance, 7), None);
        assert_eq!(maintenance_overdue_intent(&maintenance), None);
    }

    #[test]
    fn expired_and_overdue_are_high_priority() {
        let warranty = WarrantyRow {
            asset_id: 42,
            assigned_to: Some(2),
            expires_on: day("2026-08-01"),
        };
        let intent = warranty_expired_intent(&warranty).unwrap();
        assert_eq!(intent.kind, NotificationKind::WarrantyExpired);
        assert_eq!(intent.priority, Priority::High);

        let maintenance = MaintenanceRow {
            schedule_id: 9,
            asset_id: 42,
            assigned_to: Some(2),
            scheduled_on: day("2026-08-23"),
        };
        let intent = maintenance_overdue_intent(&maintenance).unwrap();
        assert_eq!(intent.kind, NotificationKind::MaintenanceOverdue);
        assert_eq!(intent.priority, Priority::High);
    }

    #[test]
    fn maintenance_intent_points_at_schedule_and_asset() {
        let row = MaintenanceRow {
            schedule_id: 9,
            asset_id: 42,
            assigned_to: Some(5),
            scheduled_on: day("2026-08-30"),
        };
        let intent = maintenance_due_soon_intent(&row, 7).unwrap();
        assert_eq!(intent.entity_kind, EntityKind::MaintenanceSchedule);
        assert_eq!(intent.entity_id, 9);
        assert_eq!(intent.asset_id, Some(42));
    }
}
