//! Depot notification engine.
//!
//! This crate turns domain changes into persisted, localized
//! notifications without coupling to storage or blocking the operation
//! that triggered them:
//!
//! - [`MessageCatalog`] — immutable key/locale -> template mapping,
//!   built once at startup.
//! - [`Renderer`] — locale fallback and `{param}` substitution;
//!   [`Renderer::render_all`] produces the full translation set.
//! - [`Dispatcher`] — bounded worker pool that renders intents and
//!   persists them best-effort through the [`ports::NotificationSink`]
//!   port, with [`DispatchStats`] counters.
//! - [`DeadlineScanner`] — the warranty/maintenance window scans over a
//!   [`ports::DeadlineSource`].
//! - [`Scheduler`] — daily wall-clock driver for the scan jobs.
//!
//! The composition root implements the [`ports`] traits over its storage
//! layer and wires everything together; see [`NotifyConfig`] for the
//! tunables.

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod ports;
pub mod render;
pub mod scanner;
pub mod scheduler;

pub use catalog::{CatalogBuilder, MessageCatalog};
pub use config::NotifyConfig;
pub use dispatch::{DispatchCounts, DispatchStats, Dispatcher, DispatcherHandle};
pub use render::{LocalizedMessage, Renderer};
pub use scanner::{DeadlineScanner, ScanJob, ScanOutcome, ScanWindows};
pub use scheduler::{JobSchedule, Scheduler};
