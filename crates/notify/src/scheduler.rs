//! Scan scheduling.
//!
//! One tokio task per scan job: sleep until the next occurrence, run the
//! scan, repeat. Schedules are structured values ([`JobSchedule`]), not
//! cron strings. [`Scheduler::stop`] cancels the tasks and waits (bounded)
//! for them, so an in-flight scan finishes instead of being abandoned
//! mid-run. Single-process; nothing coordinates schedules across
//! instances.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, Utc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ports::DeadlineSource;
use crate::scanner::{DeadlineScanner, ScanJob};

/// How long `stop` waits for job tasks to finish.
const STOP_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// When a job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSchedule {
    /// Once a day at a fixed UTC wall-clock time.
    DailyAt { hour: u32, minute: u32, second: u32 },
    /// On a fixed period. Used by tests and development setups.
    Every(Duration),
}

impl JobSchedule {
    /// Time until the next occurrence, seen from `now`.
    ///
    /// `DailyAt` picks today's occurrence if it is still ahead, otherwise
    /// the same time tomorrow. An occurrence landing exactly on `now`
    /// counts as passed.
    pub fn next_delay(&self, now: DateTime<Utc>) -> Duration {
        match self {
            Self::Every(period) => *period,
            Self::DailyAt {
                hour,
                minute,
                second,
            } => {
                // Out-of-range fields cannot come from config parsing;
                // fall back to midnight rather than panic.
                let time =
                    NaiveTime::from_hms_opt(*hour, *minute, *second).unwrap_or(NaiveTime::MIN);
                let today = now.date_naive().and_time(time).and_utc();
                let target = if today > now {
                    today
                } else {
                    today + chrono::Duration::days(1)
                };
                (target - now).to_std().unwrap_or(Duration::ZERO)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Background driver for the deadline scans.
pub struct Scheduler {
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl Scheduler {
    /// Spawn one background task per `(job, schedule)` pair.
    ///
    /// Jobs are independent: a long run of one never delays another's
    /// schedule.
    pub fn start<D>(
        scanner: Arc<DeadlineScanner<D>>,
        jobs: Vec<(ScanJob, JobSchedule)>,
    ) -> Self
    where
        D: DeadlineSource + 'static,
    {
        let cancel = CancellationToken::new();
        let mut tasks = Vec::with_capacity(jobs.len());
        for (job, schedule) in jobs {
            tasks.push(tokio::spawn(job_loop(
                job,
                schedule,
                Arc::clone(&scanner),
                cancel.clone(),
            )));
        }
        tracing::info!(jobs = tasks.len(), "Scan scheduler started");
        Self { cancel, tasks }
    }

    /// Cancel all job tasks and wait for them to exit.
    ///
    /// A scan that is already running completes first; the wait is bounded
    /// by [`STOP_TIMEOUT`].
    pub async fn stop(self) {
        tracing::info!("Stopping scan scheduler");
        self.cancel.cancel();
        if tokio::time::timeout(STOP_TIMEOUT, futures::future::join_all(self.tasks))
            .await
            .is_err()
        {
            tracing::warn!("Scan scheduler tasks did not finish within the stop timeout");
        }
        tracing::info!("Scan scheduler stopped");
    }
}

async fn job_loop<D>(
    job: ScanJob,
    schedule: JobSchedule,
    scanner: Arc<DeadlineScanner<D>>,
    cancel: CancellationToken,
) where
    D: DeadlineSource + 'static,
{
    loop {
        let delay = schedule.next_delay(Utc::now());
        tracing::debug!(job = %job, delay_secs = delay.as_secs(), "Next scan run scheduled");

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(delay) => {
                // Runs outside the select: cancellation waits for the scan
                // instead of tearing it down.
                if let Err(e) = scanner.run(job).await {
                    tracing::error!(job = %job, error = %e, "Deadline scan failed");
                }
            }
        }
    }
    tracing::debug!(job = %job, "Scan job task exited");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::dispatch::{Dispatcher, DispatcherHandle};
    use crate::ports::{
        AssetLabel, DisplayNameSource, NewNotification, NotificationSink, PortError,
    };
    use crate::render::Renderer;
    use crate::scanner::ScanWindows;
    use depot_core::scan::{MaintenanceRow, WarrantyRow};
    use depot_core::DbId;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Semaphore;

    // -- next_delay ---------------------------------------------------------

    fn at(rfc3339: &str) -> DateTime<Utc> {
        rfc3339.parse().unwrap()
    }

    #[test]
    fn daily_schedule_targets_today_while_still_ahead() {
        let schedule = JobSchedule::DailyAt {
            hour: 6,
            minute: 30,
            second: 0,
        };
        let now = at("2026-08-24T06:00:00Z");
        assert_eq!(schedule.next_delay(now), Duration::from_secs(30 * 60));
    }

    #[test]
    fn daily_schedule_rolls_to_tomorrow_once_passed() {
        let schedule = JobSchedule::DailyAt {
            hour: 6,
            minute: 0,
            second: 0,
        };
        let now = at("2026-08-24T07:00:00Z");
        assert_eq!(schedule.next_delay(now), Duration::from_secs(23 * 3600));
    }

    #[test]
    fn an_occurrence_exactly_now_counts_as_passed() {
        let schedule = JobSchedule::DailyAt {
            hour: 6,
            minute: 0,
            second: 0,
        };
        let now = at("2026-08-24T06:00:00Z");
        assert_eq!(schedule.next_delay(now), Duration::from_secs(24 * 3600));
    }

    #[test]
    fn periodic_schedule_is_the_period() {
        let schedule = JobSchedule::Every(Duration::from_secs(90));
        assert_eq!(
            schedule.next_delay(at("2026-08-24T06:00:00Z")),
            Duration::from_secs(90)
        );
    }

    // -- fakes --------------------------------------------------------------

    #[derive(Clone)]
    struct OneRowSource {
        gate: Option<Arc<Semaphore>>,
        started: Arc<Semaphore>,
        completed: Arc<AtomicBool>,
    }

    impl OneRowSource {
        fn immediate() -> Self {
            Self {
                gate: None,
                started: Arc::new(Semaphore::new(0)),
                completed: Arc::new(AtomicBool::new(false)),
            }
        }

        fn gated() -> Self {
            Self {
                gate: Some(Arc::new(Semaphore::new(0))),
                ..Self::immediate()
            }
        }
    }

    impl DeadlineSource for OneRowSource {
        async fn warranty_due_soon(&self, _days: u32) -> Result<Vec<WarrantyRow>, PortError> {
            self.started.add_permits(1);
            if let Some(gate) = &self.gate {
                if let Ok(permit) = gate.acquire().await {
                    permit.forget();
                }
            }
            self.completed.store(true, Ordering::SeqCst);
            Ok(vec![WarrantyRow {
                asset_id: 1,
                assigned_to: Some(2),
                expires_on: "2026-09-03".parse().unwrap(),
            }])
        }

        async fn warranty_expired(&self) -> Result<Vec<WarrantyRow>, PortError> {
            Ok(Vec::new())
        }

        async fn maintenance_due_soon(&self, _days: u32) -> Result<Vec<MaintenanceRow>, PortError> {
            Ok(Vec::new())
        }

        async fn maintenance_overdue(&self) -> Result<Vec<MaintenanceRow>, PortError> {
            Ok(Vec::new())
        }
    }

    #[derive(Clone, Default)]
    struct CountingSink;

    impl NotificationSink for CountingSink {
        async fn create(&self, _notification: &NewNotification) -> Result<DbId, PortError> {
            Ok(1)
        }
    }

    struct NoNames;

    impl DisplayNameSource for NoNames {
        async fn asset_label(&self, _asset_id: DbId) -> Result<Option<AssetLabel>, PortError> {
            Ok(None)
        }

        async fn user_name(&self, _user_id: DbId) -> Result<Option<String>, PortError> {
            Ok(None)
        }
    }

    fn scanner_over(source: OneRowSource) -> (Arc<DeadlineScanner<OneRowSource>>, Arc<DispatcherHandle>) {
        let renderer = Renderer::new(Arc::new(catalog::builtin()));
        let handle = Dispatcher::start(renderer, CountingSink, NoNames, 32, 1);
        let scanner = Arc::new(DeadlineScanner::new(
            source,
            Arc::clone(&handle),
            ScanWindows {
                warranty_days: 30,
                maintenance_days: 7,
            },
        ));
        (scanner, handle)
    }

    // -- scheduling ---------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn periodic_job_fires_once_per_period() {
        let source = OneRowSource::immediate();
        let (scanner, handle) = scanner_over(source);
        let scheduler = Scheduler::start(
            scanner,
            vec![(
                ScanJob::WarrantyDueSoon,
                JobSchedule::Every(Duration::from_secs(60)),
            )],
        );

        // Cross the first tick but not the second.
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(handle.stats().enqueued, 1);

        scheduler.stop().await;
        handle.shutdown().await;
        assert_eq!(handle.stats().delivered, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_waits_for_an_inflight_scan() {
        let source = OneRowSource::gated();
        let started = Arc::clone(&source.started);
        let gate = Arc::clone(source.gate.as_ref().unwrap());
        let completed = Arc::clone(&source.completed);
        let (scanner, handle) = scanner_over(source);
        let scheduler = Scheduler::start(
            scanner,
            vec![(
                ScanJob::WarrantyDueSoon,
                JobSchedule::Every(Duration::from_millis(10)),
            )],
        );

        // Wait until the scan is inside the source call, then stop while
        // it is still blocked.
        started.acquire().await.unwrap().forget();
        let stopping = tokio::spawn(scheduler.stop());
        tokio::task::yield_now().await;

        gate.add_permits(1);
        stopping.await.unwrap();

        // stop() only returned after the scan ran to completion.
        assert!(completed.load(Ordering::SeqCst));
        assert_eq!(handle.stats().enqueued, 1);
        handle.shutdown().await;
    }
}
