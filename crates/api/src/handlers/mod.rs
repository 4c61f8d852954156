//! HTTP request handlers, grouped by resource.

pub mod assets;
pub mod notifications;
