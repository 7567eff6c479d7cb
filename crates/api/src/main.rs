use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use civic_api::config::{DatabaseConfig, ServerConfig};
use civic_api::router::build_app_router;
use civic_api::state::AppState;
use civic_api::ws;
use civic_events::ChangeFeed;
use civic_workflow::PgGateway;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "civic_api=debug,civic_workflow=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = civic_db::create_pool(&db_config.url, db_config.max_connections).await?;
    tracing::info!(
        max_connections = db_config.max_connections,
        "Database connection pool created"
    );

    civic_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    civic_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    // --- Change feed + gateway ---
    let feed = Arc::new(ChangeFeed::new(config.change_feed_capacity));
    let gateway = Arc::new(PgGateway::new(pool.clone(), Arc::clone(&feed)));

    // --- App state ---
    let addr = SocketAddr::new(config.host.parse::<IpAddr>()?, config.port);
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    let state = AppState::new(gateway, feed, config);
    let ws_manager = Arc::clone(&state.ws_manager);

    // --- Heartbeat ---
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- Router ---
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // Open sockets never finish on their own; close them so the
            // drain can complete.
            let ws_count = ws_manager.connection_count().await;
            tracing::info!(ws_count, "Closing WebSocket connections");
            ws_manager.shutdown_all().await;
        })
        .await?;

    // --- Post-shutdown cleanup ---
    heartbeat_handle.abort();
    tracing::info!("Heartbeat task stopped");

    tokio::time::timeout(shutdown_timeout, pool.close())
        .await
        .unwrap_or_else(|_| tracing::warn!("Timed out closing database pool"));
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
