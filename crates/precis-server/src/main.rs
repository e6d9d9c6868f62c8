//! precis-server - Web front end binary.

use std::net::SocketAddr;
use std::time::Duration;

use precis_core::PrecisConfig;
use precis_server::{create_server, AppState};
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("precis_server=debug".parse()?),
        )
        .init();

    // Configuration from PRECIS_CONFIG and PRECIS_* variables
    let config = PrecisConfig::from_env()?;
    let addr: SocketAddr = config.server.bind_addr().parse()?;
    info!(
        model = %config.model.model,
        sentence_count = config.summarizer.sentence_count,
        max_upload_bytes = config.server.max_upload_bytes,
        session_ttl_secs = config.server.session_ttl_secs,
        "Configuration loaded"
    );

    // The model is loaded lazily on the first abstractive request
    let state = AppState::new(config);

    // Expired uploads are released even when no new upload arrives
    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sessions.sweep_expired().await;
        }
    });
    let app = create_server(state);

    info!("Starting precis-server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server stopped cleanly");
    Ok(())
}
