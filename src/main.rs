use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use admin_core::{
    connect_pool, constants::DEFAULT_REST_ADDR, AdminService, DatabaseConfig, PgAdminStore,
    PoolSettings, RunMode,
};
use api_rest::{router, AppState};

/// Main entry point for the clinic admin backend
///
/// Resolves configuration once, opens the shared connection pool, and serves the REST API.
///
/// # Environment Variables
/// - `ADMIN_ENV`: `development` allows the `POSTGRES_*` variables below to be omitted
/// - `POSTGRES_USER`, `POSTGRES_PASSWORD`, `POSTGRES_HOST`, `POSTGRES_PORT`, `POSTGRES_DB`:
///   database credentials, all required outside development mode
/// - `ADMIN_DB_MAX_CONNECTIONS`, `ADMIN_DB_MIN_CONNECTIONS`, `ADMIN_DB_ACQUIRE_TIMEOUT_SECS`,
///   `ADMIN_DB_IDLE_TIMEOUT_SECS`, `ADMIN_DB_MAX_LIFETIME_SECS`: pool tuning
/// - `ADMIN_REST_ADDR`: server address (default: "0.0.0.0:8083")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - a required database variable is missing or invalid,
/// - the database cannot be reached at startup, or
/// - the server address cannot be bound or the server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_admin_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("admin_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let lookup = |key: &str| std::env::var(key).ok();

    let mode = RunMode::from_env_value(lookup("ADMIN_ENV"));
    let db_config = DatabaseConfig::from_lookup(mode, lookup)?;
    let pool_settings = PoolSettings::from_lookup(lookup)?;
    let addr = lookup("ADMIN_REST_ADDR").unwrap_or_else(|| DEFAULT_REST_ADDR.into());

    tracing::info!(
        "-- Connecting to PostgreSQL at {}:{}/{} ({:?} mode)",
        db_config.host(),
        db_config.port(),
        db_config.database(),
        mode
    );
    let pool = connect_pool(&db_config, &pool_settings).await?;

    let state = AppState::new(AdminService::new(Arc::new(PgAdminStore::new(pool))));
    let app = router(state);

    tracing::info!("++ Starting clinic admin REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("-- Shutting down");
}
