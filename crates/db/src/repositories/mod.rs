//! Repository layer.
//!
//! Repositories are stateless structs whose methods take `&PgPool` and
//! surface `sqlx::Error` untranslated; HTTP mapping happens in the API
//! crate.

pub mod asset_repo;
pub mod maintenance_repo;
pub mod notification_repo;
pub mod user_repo;

pub use asset_repo::AssetRepo;
pub use maintenance_repo::MaintenanceRepo;
pub use notification_repo::NotificationRepo;
pub use user_repo::UserRepo;
