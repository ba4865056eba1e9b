//! Fourline room server binary.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `fourline.yaml` and the environment
//! 3. Create the shared lobby state
//! 4. Serve until `Ctrl-C`

use std::path::Path;
use std::sync::Arc;

use fourline_server::{AppState, CONFIG_FILE, ServerConfig, shutdown_signal, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server cannot bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("fourline-server starting");

    // 2. Load configuration.
    let config = ServerConfig::load(Path::new(CONFIG_FILE))?;
    info!(
        host = %config.host,
        port = config.port,
        allowed_origin = %config.allowed_origin,
        "Configuration loaded"
    );

    // 3. Create the lobby. Dropped on return, taking every room with it.
    let state = Arc::new(AppState::new());

    // 4. Serve.
    start_server(&config, Arc::clone(&state), shutdown_signal()).await?;

    let hub = state.hub().await;
    info!(
        open_rooms = hub.router().registry().len(),
        "fourline-server shutdown complete"
    );

    Ok(())
}
