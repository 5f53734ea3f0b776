//! Wager Service - HTTP API for account balances and the bet/win ledger
//!
//! This is the main entry point for the wager service.

use std::future::IntoFuture;
use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wager_cache::{BootstrapOptions, FlushScheduler, Ledger};
use wager_service::{create_router, AppState, ServiceConfig};
use wager_store::{RocksStore, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment
    let config = ServiceConfig::from_env();

    // Initialize tracing
    let default_filter = if config.is_development() {
        "debug"
    } else {
        "info,wager=debug"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Wager Service");
    tracing::info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir,
        mode = %config.mode,
        flush_interval = ?config.flush_interval(),
        bet_sum_mode = %config.bet_sum_mode,
        "Service configuration loaded"
    );

    // Initialize RocksDB store
    tracing::info!(path = %config.data_dir, "Opening RocksDB store");
    let store: Arc<dyn Store> = Arc::new(RocksStore::open(&config.data_dir)?);

    // Rebuild the cache; any failure aborts startup
    let options = BootstrapOptions {
        timeout: config.bootstrap_timeout(),
        bet_sum_mode: config.bet_sum_mode,
    };
    let ledger = Arc::new(Ledger::bootstrap(store, options).await?);

    let scheduler = FlushScheduler::spawn(Arc::clone(&ledger), config.flush_interval());

    let state = AppState::new(ledger, config.clone());
    let app = create_router(state);

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;

    // The final flush completes before the HTTP drain starts.
    let (drain_tx, mut drain_rx) = watch::channel(false);
    let shutdown = async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, running final flush");
        scheduler.shutdown().await;
        let _ = drain_tx.send(true);
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .into_future();
    let grace = config.shutdown_grace();

    tokio::select! {
        result = server => result?,
        () = async {
            if drain_rx.wait_for(|draining| *draining).await.is_ok() {
                tokio::time::sleep(grace).await;
            } else {
                std::future::pending::<()>().await;
            }
        } => {
            tracing::warn!(grace = ?grace, "Grace period elapsed, abandoning in-flight requests");
        }
    }

    tracing::info!("Wager Service stopped");
    Ok(())
}

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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
