//! # Brew POS API Server
//!
//! ```bash
//! # Defaults: 127.0.0.1:8080, 12% VAT
//! cargo run -p brew-api
//!
//! # Overrides
//! BREW_PORT=9000 BREW_TAX_RATE_BPS=1000 cargo run -p brew-api
//! ```

use tokio::net::TcpListener;
use tracing::{info, warn};

use brew_api::{build_router, init_tracing, ApiConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Brew POS API v{}", env!("CARGO_PKG_VERSION"));

    let config = ApiConfig::load(None)?;
    let addr = config.server.bind_address();

    info!(
        store = %config.store.name,
        tax_rate_bps = config.ledger.tax_rate_bps,
        "Configuration loaded"
    );

    let app = build_router(AppState::new(config));
    let listener = TcpListener::bind(&addr).await?;

    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
