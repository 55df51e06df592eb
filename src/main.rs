//! Take Five - A state-managed HTTP server for Pomodoro countdown timing
//!
//! This is the main entry point for the take-five application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use take_five::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::{alarm_task, countdown_tick_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "take_five={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting take-five server v0.1.0");
    info!(
        "Configuration: host={}, port={}, session={}min, break={}min, interval={}ms",
        config.host, config.port, config.session, config.break_minutes, config.interval
    );

    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        std::process::exit(1);
    }

    // Create application state
    let state = Arc::new(AppState::new(&config));

    // Start the countdown tick background task
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_tick_task(tick_state).await;
    });

    // Start the alarm background task
    let alarm_state = Arc::clone(&state);
    tokio::spawn(async move {
        alarm_task(alarm_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start                   - Begin the countdown");
    info!("  POST /pause                   - Freeze the countdown");
    info!("  POST /resume                  - Continue a paused countdown");
    info!("  POST /cancel                  - Return to idle");
    info!("  POST /phase/:index/increment  - Lengthen a phase by one minute");
    info!("  POST /phase/:index/decrement  - Shorten a phase by one minute");
    info!("  GET  /status                  - Current timer snapshot");
    info!("  GET  /health                  - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
