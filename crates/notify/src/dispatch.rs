//! Best-effort notification dispatch.
//!
//! [`Dispatcher::start`] spawns a fixed worker pool over a bounded mpsc
//! queue. Producers hand intents to [`DispatcherHandle::enqueue`], which
//! never blocks and never errors: a full queue drops the intent and counts
//! it. Workers resolve missing display names, render the full translation
//! set, and persist through the [`NotificationSink`] port; persistence
//! failures are logged and counted, never raised. [`DispatchStats`] makes
//! the best-effort contract observable.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use depot_core::{NotificationIntent, ParamKey};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

use crate::ports::{DisplayNameSource, NewNotification, NotificationSink};
use crate::render::Renderer;

/// How long `shutdown` waits for each worker to drain and exit.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Atomic dispatch counters, shared between the handle and the workers.
#[derive(Debug, Default)]
pub struct DispatchStats {
    enqueued: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
}

impl DispatchStats {
    pub fn counts(&self) -> DispatchCounts {
        DispatchCounts {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of the dispatch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchCounts {
    /// Intents accepted into the queue.
    pub enqueued: u64,
    /// Notifications persisted successfully.
    pub delivered: u64,
    /// Persistence attempts that errored (intent lost).
    pub failed: u64,
    /// Intents rejected because the queue was full or closed.
    pub dropped: u64,
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Entry point; see [`Dispatcher::start`].
pub struct Dispatcher;

/// Producer-side handle. Cheap to share behind an `Arc`; the request
/// handlers and the scan scheduler both enqueue through it.
pub struct DispatcherHandle {
    /// `None` once `shutdown` has closed the queue.
    tx: std::sync::Mutex<Option<mpsc::Sender<NotificationIntent>>>,
    workers: std::sync::Mutex<Vec<JoinHandle<()>>>,
    stats: Arc<DispatchStats>,
}

impl Dispatcher {
    /// Spawn the worker pool and return the shared producer handle.
    ///
    /// `queue_capacity` bounds the number of intents waiting for a worker;
    /// both it and `workers` are clamped to at least 1.
    pub fn start<S, N>(
        renderer: Renderer,
        sink: S,
        names: N,
        queue_capacity: usize,
        workers: usize,
    ) -> Arc<DispatcherHandle>
    where
        S: NotificationSink + 'static,
        N: DisplayNameSource + 'static,
    {
        let capacity = queue_capacity.max(1);
        let worker_count = workers.max(1);

        let (tx, rx) = mpsc::channel(capacity);
        let rx = Arc::new(tokio::sync::Mutex::new(rx));
        let stats = Arc::new(DispatchStats::default());
        let sink = Arc::new(sink);
        let names = Arc::new(names);

        let mut handles = Vec::with_capacity(worker_count);
        for worker in 0..worker_count {
            handles.push(tokio::spawn(worker_loop(
                worker,
                Arc::clone(&rx),
                renderer.clone(),
                Arc::clone(&sink),
                Arc::clone(&names),
                Arc::clone(&stats),
            )));
        }

        tracing::info!(
            queue_capacity = capacity,
            workers = worker_count,
            "Notification dispatcher started"
        );

        Arc::new(DispatcherHandle {
            tx: std::sync::Mutex::new(Some(tx)),
            workers: std::sync::Mutex::new(handles),
            stats,
        })
    }
}

impl DispatcherHandle {
    /// Queue an intent for delivery. Non-blocking; returns whether the
    /// intent was accepted. A full or closed queue counts the intent as
    /// dropped -- the caller is never failed.
    pub fn enqueue(&self, intent: NotificationIntent) -> bool {
        let guard = lock_unpoisoned(&self.tx);
        let Some(tx) = guard.as_ref() else {
            self.stats.dropped.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(kind = %intent.kind, "Dispatcher already shut down, intent dropped");
            return false;
        };

        match tx.try_send(intent) {
            Ok(()) => {
                self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(TrySendError::Full(intent)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    kind = %intent.kind,
                    recipient = intent.recipient_user_id,
                    "Notification queue full, intent dropped"
                );
                false
            }
            Err(TrySendError::Closed(intent)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(kind = %intent.kind, "Notification queue closed, intent dropped");
                false
            }
        }
    }

    /// Current counter values.
    pub fn stats(&self) -> DispatchCounts {
        self.stats.counts()
    }

    /// Close the queue and join the workers.
    ///
    /// Already-enqueued intents are drained before the workers exit; each
    /// worker gets at most [`SHUTDOWN_TIMEOUT`] to finish.
    pub async fn shutdown(&self) {
        tracing::info!("Shutting down notification dispatcher");

        // Dropping the sender closes the queue; recv() therefore drains
        // the backlog and then returns None in every worker.
        drop(lock_unpoisoned(&self.tx).take());

        let handles: Vec<_> = lock_unpoisoned(&self.workers).drain(..).collect();
        for handle in handles {
            if tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await.is_err() {
                tracing::warn!("Dispatcher worker did not finish within the shutdown timeout");
            }
        }

        let counts = self.stats.counts();
        tracing::info!(
            delivered = counts.delivered,
            failed = counts.failed,
            dropped = counts.dropped,
            "Notification dispatcher stopped"
        );
    }
}

fn lock_unpoisoned<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

async fn worker_loop<S, N>(
    worker: usize,
    rx: Arc<tokio::sync::Mutex<mpsc::Receiver<NotificationIntent>>>,
    renderer: Renderer,
    sink: Arc<S>,
    names: Arc<N>,
    stats: Arc<DispatchStats>,
) where
    S: NotificationSink + 'static,
    N: DisplayNameSource + 'static,
{
    loop {
        let next = { rx.lock().await.recv().await };
        let Some(mut intent) = next else {
            break;
        };

        resolve_missing_params(names.as_ref(), &mut intent).await;

        let translations = renderer.render_all(
            intent.kind.title_key(),
            intent.kind.message_key(),
            &intent.params,
        );
        let payload = NewNotification {
            recipient_user_id: intent.recipient_user_id,
            entity_kind: intent.entity_kind,
            entity_id: intent.entity_id,
            asset_id: intent.asset_id,
            kind: intent.kind,
            priority: intent.priority,
            translations,
        };

        match sink.create(&payload).await {
            Ok(notification_id) => {
                stats.delivered.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    worker,
                    notification_id,
                    recipient = payload.recipient_user_id,
                    kind = %payload.kind,
                    "Notification persisted"
                );
            }
            Err(e) => {
                stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    worker,
                    recipient = payload.recipient_user_id,
                    kind = %payload.kind,
                    error = %e,
                    "Failed to persist notification"
                );
            }
        }
    }

    tracing::debug!(worker, "Dispatcher worker exited");
}

/// Fill in asset/user display names the intent's producer could not know.
/// Lookup failures are logged and tolerated; the affected placeholders then
/// stay literal in the rendered text.
async fn resolve_missing_params<N: DisplayNameSource>(names: &N, intent: &mut NotificationIntent) {
    let wanted = intent.kind.params();

    let label_missing = (wanted.contains(&ParamKey::AssetName)
        && !intent.params.contains(ParamKey::AssetName))
        || (wanted.contains(&ParamKey::AssetTag) && !intent.params.contains(ParamKey::AssetTag));
    if label_missing {
        if let Some(asset_id) = intent.asset_id {
            match names.asset_label(asset_id).await {
                Ok(Some(label)) => {
                    if !intent.params.contains(ParamKey::AssetName) {
                        intent.params.set(ParamKey::AssetName, label.name);
                    }
                    if !intent.params.contains(ParamKey::AssetTag) {
                        intent.params.set(ParamKey::AssetTag, label.asset_tag);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(asset_id, error = %e, "Failed to resolve asset label");
                }
            }
        }
    }

    if wanted.contains(&ParamKey::UserName) && !intent.params.contains(ParamKey::UserName) {
        match names.user_name(intent.recipient_user_id).await {
            Ok(Some(name)) => intent.params.set(ParamKey::UserName, name),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    user_id = intent.recipient_user_id,
                    error = %e,
                    "Failed to resolve user name"
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
