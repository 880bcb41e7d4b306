//! Seat Map Server
//!
//! This binary:
//! - Loads configuration from the environment (and `.env`)
//! - Fetches the show descriptor once, before accepting connections
//! - Serves the seat map page and JSON API
//! - Shuts down gracefully on Ctrl+C or SIGTERM
//!
//! # Usage
//!
//! ```bash
//! SEATMAP_SHOW_SOURCE=https://cdn.example.com/seats.json cargo run --bin seatmap-server
//! ```

use anyhow::Context;
use seatmap_core::session::{
    SeatPickerAction, SeatPickerEnvironment, SeatPickerReducer, SessionState,
};
use seatmap_runtime::{loader, Store};
use seatmap_web::{build_router, AppState, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,seatmap_web=debug,seatmap_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting seat map server...");

    let config = Config::from_env();
    let location = loader::ShowLocation::parse(&config.show.source);
    tracing::info!(
        source = %location,
        max_selectable = config.show.max_selectable,
        "Configuration loaded"
    );

    let store = Arc::new(Store::new(
        SessionState::default(),
        SeatPickerReducer::new(),
        SeatPickerEnvironment::new(loader::source_for(&location)),
    ));

    // Resolves once the descriptor is loaded or the load has failed
    store
        .send(SeatPickerAction::LoadShow)
        .await
        .context("store rejected the initial load")?;

    if let Some(error) = store.state(|s| s.load_error().cloned()).await {
        tracing::error!(%error, "Show could not be loaded; serving the error page");
    }

    let addr = config.bind_addr().context("invalid HOST/PORT")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Listening");

    let app = build_router(AppState::new(Arc::clone(&store), config.show.clone()));

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = stop_rx.await;
            })
            .into_future(),
    );

    shutdown_signal().await;
    tracing::info!("Shutting down gracefully...");
    store.shutdown();
    let _ = stop_tx.send(());

    match tokio::time::timeout(config.shutdown_timeout(), server).await {
        Ok(joined) => joined.context("server task panicked")?.context("server error")?,
        Err(_) => tracing::warn!(
            timeout_secs = config.server.shutdown_timeout,
            "Graceful shutdown timed out; dropping open connections"
        ),
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(error) => {
                tracing::error!(%error, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
