use std::sync::Arc;

use depot_db::DbPool;
use depot_notify::DispatcherHandle;

use crate::config::ServerConfig;

/// Shared application state passed to all handlers.
///
/// Cloning is cheap: the pool is an `Arc` internally and the other
/// fields are wrapped in `Arc` here.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: DbPool,
    /// Server configuration (read-only after startup).
    pub config: Arc<ServerConfig>,
    /// Handle to the notification dispatcher; handlers enqueue intents
    /// here and never block on delivery.
    pub dispatcher: Arc<DispatcherHandle>,
}
