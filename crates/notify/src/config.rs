//! Engine configuration.

use chrono::{NaiveTime, Timelike};

use crate::scanner::{ScanJob, ScanWindows};
use crate::scheduler::JobSchedule;

/// Notification engine configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Look-ahead window for the warranty due-soon scan, in days
    /// (default: `30`).
    pub warranty_window_days: u32,
    /// Look-ahead window for the maintenance due-soon scan, in days
    /// (default: `7`).
    pub maintenance_window_days: u32,
    /// Daily UTC run time of the warranty due-soon scan (default: `06:00:00`).
    pub warranty_due_soon_at: JobSchedule,
    /// Daily UTC run time of the warranty expired scan (default: `06:10:00`).
    pub warranty_expired_at: JobSchedule,
    /// Daily UTC run time of the maintenance due-soon scan (default: `06:20:00`).
    pub maintenance_due_soon_at: JobSchedule,
    /// Daily UTC run time of the maintenance overdue scan (default: `06:30:00`).
    pub maintenance_overdue_at: JobSchedule,
    /// Dispatcher queue capacity (default: `256`).
    pub queue_capacity: usize,
    /// Dispatcher worker count (default: `2`).
    pub dispatch_workers: usize,
}

impl NotifyConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default    |
    /// |-----------------------------------|------------|
    /// | `NOTIFY_WARRANTY_WINDOW_DAYS`     | `30`       |
    /// | `NOTIFY_MAINTENANCE_WINDOW_DAYS`  | `7`        |
    /// | `NOTIFY_WARRANTY_DUE_SOON_AT`     | `06:00:00` |
    /// | `NOTIFY_WARRANTY_EXPIRED_AT`      | `06:10:00` |
    /// | `NOTIFY_MAINTENANCE_DUE_SOON_AT`  | `06:20:00` |
    /// | `NOTIFY_MAINTENANCE_OVERDUE_AT`   | `06:30:00` |
    /// | `NOTIFY_QUEUE_CAPACITY`           | `256`      |
    /// | `NOTIFY_DISPATCH_WORKERS`         | `2`        |
    ///
    /// Scan times are `HH:MM:SS` wall-clock UTC. The four defaults are
    /// staggered so the jobs do not run concurrently.
    pub fn from_env() -> Self {
        let warranty_window_days: u32 = std::env::var("NOTIFY_WARRANTY_WINDOW_DAYS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("NOTIFY_WARRANTY_WINDOW_DAYS must be a valid u32");

        let maintenance_window_days: u32 = std::env::var("NOTIFY_MAINTENANCE_WINDOW_DAYS")
            .unwrap_or_else(|_| "7".into())
            .parse()
            .expect("NOTIFY_MAINTENANCE_WINDOW_DAYS must be a valid u32");

        let queue_capacity: usize = std::env::var("NOTIFY_QUEUE_CAPACITY")
            .unwrap_or_else(|_| "256".into())
            .parse()
            .expect("NOTIFY_QUEUE_CAPACITY must be a valid usize");

        let dispatch_workers: usize = std::env::var("NOTIFY_DISPATCH_WORKERS")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .expect("NOTIFY_DISPATCH_WORKERS must be a valid usize");

        Self {
            warranty_window_days,
            maintenance_window_days,
            warranty_due_soon_at: daily_from_env("NOTIFY_WARRANTY_DUE_SOON_AT", "06:00:00"),
            warranty_expired_at: daily_from_env("NOTIFY_WARRANTY_EXPIRED_AT", "06:10:00"),
            maintenance_due_soon_at: daily_from_env("NOTIFY_MAINTENANCE_DUE_SOON_AT", "06:20:00"),
            maintenance_overdue_at: daily_from_env("NOTIFY_MAINTENANCE_OVERDUE_AT", "06:30:00"),
            queue_capacity,
            dispatch_workers,
        }
    }

    /// The scan windows as the scanner consumes them.
    pub fn windows(&self) -> ScanWindows {
        ScanWindows {
            warranty_days: self.warranty_window_days,
            maintenance_days: self.maintenance_window_days,
        }
    }

    /// The four scan jobs paired with their schedules, ready for
    /// [`crate::scheduler::Scheduler::start`].
    pub fn jobs(&self) -> Vec<(ScanJob, JobSchedule)> {
        vec![
            (ScanJob::WarrantyDueSoon, self.warranty_due_soon_at),
            (ScanJob::WarrantyExpired, self.warranty_expired_at),
            (ScanJob::MaintenanceDueSoon, self.maintenance_due_soon_at),
            (ScanJob::MaintenanceOverdue, self.maintenance_overdue_at),
        ]
    }
}

/// Parse an `HH:MM:SS` string into a daily schedule.
pub fn parse_daily_time(value: &str) -> Option<JobSchedule> {
    let time = NaiveTime::parse_from_str(value.trim(), "%H:%M:%S").ok()?;
    Some(JobSchedule::DailyAt {
        hour: time.hour(),
        minute: time.minute(),
        second: time.second(),
    })
}

fn daily_from_env(name: &str, default: &str) -> JobSchedule {
    let value = std::env::var(name).unwrap_or_else(|_| default.into());
    parse_daily_time(&value)
        .unwrap_or_else(|| panic!("{name} must be a UTC time in HH:MM:SS form"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
