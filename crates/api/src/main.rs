use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use depot_api::config::ServerConfig;
use depot_api::ports::{PgDeadlineSource, PgDisplayNames, PgNotificationSink};
use depot_api::router::build_app_router;
use depot_api::state::AppState;
use depot_notify::catalog;
use depot_notify::{DeadlineScanner, Dispatcher, NotifyConfig, Renderer, Scheduler};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    let notify_config = NotifyConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let pool = prepare_database().await;

    // --- Notification engine ---
    let renderer = Renderer::new(Arc::new(catalog::builtin()));
    let dispatcher = Dispatcher::start(
        renderer,
        PgNotificationSink::new(pool.clone()),
        PgDisplayNames::new(pool.clone()),
        notify_config.queue_capacity,
        notify_config.dispatch_workers,
    );

    let scanner = Arc::new(DeadlineScanner::new(
        PgDeadlineSource::new(pool.clone()),
        Arc::clone(&dispatcher),
        notify_config.windows(),
    ));
    let scheduler = Scheduler::start(scanner, notify_config.jobs());
    tracing::info!("Deadline scan scheduler started");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        dispatcher: Arc::clone(&dispatcher),
    };
    let app = build_app_router(state, &config);

    // --- Serve until a termination signal arrives ---
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {addr}: {e}"));
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Stop producing scan work first, then let the dispatcher drain what
    // is already queued.
    let cleanup = async {
        scheduler.stop().await;
        tracing::info!("Scan scheduler stopped");

        dispatcher.shutdown().await;
        let stats = dispatcher.stats();
        tracing::info!(
            delivered = stats.delivered,
            failed = stats.failed,
            dropped = stats.dropped,
            "Notification dispatcher drained"
        );
    };
    if tokio::time::timeout(Duration::from_secs(config.shutdown_timeout_secs), cleanup)
        .await
        .is_err()
    {
        tracing::warn!("Cleanup did not finish within the shutdown timeout");
    }

    tracing::info!("Graceful shutdown complete");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "depot_api=debug,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify, and migrate. Any failure here ends the process.
async fn prepare_database() -> sqlx::PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = depot_db::create_pool(&url)
        .await
        .expect("Failed to connect to database");
    depot_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    depot_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready, migrations applied");
    pool
}

/// Resolves once SIGINT or SIGTERM arrives.
///
/// SIGTERM matters for process managers (Docker, systemd, Kubernetes);
/// SIGINT covers an interactive Ctrl-C.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "Termination signal received, starting graceful shutdown");
}
