//! Depot pure domain logic.
//!
//! Everything in this crate is side-effect free, which lets the engine,
//! repositories, and API share one vocabulary without pulling in the
//! database stack:
//!
//! - [`Locale`] — the fixed supported-locale set and its normalization.
//! - [`ParamKey`] / [`MessageParams`] — typed template parameters.
//! - [`NotificationKind`] — the closed set of notification kinds with
//!   their catalog keys and priorities.
//! - [`NotificationIntent`] — the ephemeral "notify this user about this
//!   entity" value produced by detection and scans.
//! - [`transition::detect`] — the asset before/after transition rules.
//! - [`scan`] — deadline scan rows and their row-to-intent mappings.

pub mod asset;
pub mod error;
pub mod intent;
pub mod kind;
pub mod locale;
pub mod params;
pub mod scan;
pub mod transition;
pub mod types;

pub use asset::{AssetCondition, AssetSnapshot, AssetStatus, TouchedFields};
pub use error::CoreError;
pub use intent::{EntityKind, NotificationIntent};
pub use kind::{NotificationKind, Priority};
pub use locale::{Locale, DEFAULT_LOCALE, SUPPORTED_LOCALES};
pub use params::{MessageParams, ParamKey};
pub use types::{Day, DbId, Timestamp};
