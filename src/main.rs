//! Countdown Server - A countdown timer engine with a local HTTP adapter
//!
//! This is the main entry point for the countdown-server application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use countdown_server::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::TICK_INTERVAL,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_server={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, tick={}ms",
        config.host,
        config.port,
        TICK_INTERVAL.as_millis()
    );

    let state = Arc::new(AppState::new(config.port, config.host.clone()));
    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /duration       - Set hours/minutes/seconds");
    info!("  POST /start          - Start or resume the countdown");
    info!("  POST /pause          - Pause the countdown");
    info!("  POST /reset          - Zero the countdown");
    info!("  POST /reload         - Restore the last started duration");
    info!("  POST /adjust/:field  - Step a field up or down");
    info!("  GET  /status         - Current snapshot and server info");
    info!("  GET  /events         - Snapshot stream (server-sent events)");
    info!("  GET  /health         - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    state.engine.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
