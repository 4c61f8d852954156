//! Deadline scans.
//!
//! [`DeadlineScanner`] runs the four window scans: query the
//! [`DeadlineSource`] port, map each row to an intent via the pure
//! functions in [`depot_core::scan`], and enqueue the intents on the
//! dispatcher. Scans are at-least-once: an entity that stays inside a
//! window is picked up again on every run, so a daily schedule yields a
//! daily nudge.

use std::sync::Arc;

use depot_core::scan;

use crate::dispatch::DispatcherHandle;
use crate::ports::{DeadlineSource, PortError};

// ---------------------------------------------------------------------------
// Jobs and windows
// ---------------------------------------------------------------------------

/// The four scan jobs the scheduler drives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScanJob {
    WarrantyDueSoon,
    WarrantyExpired,
    MaintenanceDueSoon,
    MaintenanceOverdue,
}

/// Every job, in the order the scheduler registers them.
pub const ALL_SCAN_JOBS: &[ScanJob] = &[
    ScanJob::WarrantyDueSoon,
    ScanJob::WarrantyExpired,
    ScanJob::MaintenanceDueSoon,
    ScanJob::MaintenanceOverdue,
];

impl ScanJob {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WarrantyDueSoon => "warranty_due_soon",
            Self::WarrantyExpired => "warranty_expired",
            Self::MaintenanceDueSoon => "maintenance_due_soon",
            Self::MaintenanceOverdue => "maintenance_overdue",
        }
    }
}

impl std::fmt::Display for ScanJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look-ahead windows for the due-soon scans, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindows {
    pub warranty_days: u32,
    pub maintenance_days: u32,
}

/// What one scan run did: rows the query returned vs. intents the queue
/// accepted. The difference is unassigned rows plus queue drops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub examined: usize,
    pub enqueued: usize,
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Runs deadline scans against a [`DeadlineSource`] and feeds the
/// dispatcher.
pub struct DeadlineScanner<D> {
    source: D,
    dispatcher: Arc<DispatcherHandle>,
    windows: ScanWindows,
}

impl<D: DeadlineSource> DeadlineScanner<D> {
    pub fn new(source: D, dispatcher: Arc<DispatcherHandle>, windows: ScanWindows) -> Self {
        Self {
            source,
            dispatcher,
            windows,
        }
    }

    /// Run one scan job to completion.
    ///
    /// A source error aborts the run; nothing enqueued so far is taken
    /// back (at-least-once). The caller decides retry policy -- the
    /// scheduler simply waits for the next tick.
    pub async fn run(&self, job: ScanJob) -> Result<ScanOutcome, PortError> {
        let outcome = match job {
            ScanJob::WarrantyDueSoon => self.warranty_due_soon().await?,
            ScanJob::WarrantyExpired => self.warranty_expired().await?,
            ScanJob::MaintenanceDueSoon => self.maintenance_due_soon().await?,
            ScanJob::MaintenanceOverdue => self.maintenance_overdue().await?,
        };
        tracing::info!(
            job = %job,
            examined = outcome.examined,
            enqueued = outcome.enqueued,
            "Deadline scan finished"
        );
        Ok(outcome)
    }

    async fn warranty_due_soon(&self) -> Result<ScanOutcome, PortError> {
        let days = self.windows.warranty_days;
        let rows = self.source.warranty_due_soon(days).await?;
        let mut outcome = ScanOutcome {
            examined: rows.len(),
            enqueued: 0,
        };
        for row in &rows {
            if let Some(intent) = scan::warranty_due_soon_intent(row, days) {
                if self.dispatcher.enqueue(intent) {
                    outcome.enqueued += 1;
                }
            }
        }
        Ok(outcome)
    }

    async fn warranty_expired(&self) -> Result<ScanOutcome, PortError> {
        let rows = self.source.warranty_expired().await?;
        let mut outcome = ScanOutcome {
            examined: rows.len(),
            enqueued: 0,
        };
        for row in &rows {
            if let Some(intent) = scan::warranty_expired_intent(row) {
                if self.dispatcher.enqueue(intent) {
                    outcome.enqueued += 1;
                }
            }
        }
        Ok(outcome)
    }

    async fn maintenance_due_soon(&self) -> Result<ScanOutcome, PortError> {
        let days = self.windows.maintenance_days;
        let rows = self.source.maintenance_due_soon(days).await?;
        let mut outcome = ScanOutcome {
            examined: rows.len(),
            enqueued: 0,
        };
        for row in &rows {
            if let Some(intent) = scan::maintenance_due_soon_intent(row, days) {
                if self.dispatcher.enqueue(intent) {
                    outcome.enqueued += 1;
                }
            }
        }
        Ok(outcome)
    }

    async fn maintenance_overdue(&self) -> Result<ScanOutcome, PortError> {
        let rows = self.source.maintenance_overdue().await?;
        let mut outcome = ScanOutcome {
            examined: rows.len(),
            enqueued: 0,
        };
        for row in &rows {
            if let Some(intent) = scan::maintenance_overdue_intent(row) {
                if self.dispatcher.enqueue(intent) {
                    outcome.enqueued += 1;
                }
            }
        }
        Ok(outcome)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
