//! HealthFlow FHIR synchronization and proxy service.
//!
//! Pulls clinical resource collections from an upstream FHIR registry on a
//! schedule, reconciles them into Postgres, and serves a CRUD proxy over
//! the local store (or a transparent pass-through in forward mode).

mod config;
mod logging;
mod openapi;

use axum::routing::get;
use axum::{Json, Router};
use config::Config;
use healthflow_api_fhir::{proxy_router, sync_router, FhirApiState};
use healthflow_db::{run_migrations, PgResourceStore, ResourceStore};
use healthflow_registry_client::RegistryClient;
use healthflow_sync::{SyncWorker, SyncWorkerConfig};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        mode = ?config.proxy_mode,
        registry = %config.fhir_server_url,
        "Starting HealthFlow FHIR proxy"
    );

    let pool = match healthflow_db::connect(&config.database_url).await {
        Ok(pool) => {
            info!("Database connection established");
            pool
        }
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        eprintln!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    let registry = match RegistryClient::new(
        &config.fhir_server_url,
        Duration::from_secs(config.upstream_timeout_secs),
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("Failed to build registry client: {e}");
            std::process::exit(1);
        }
    };

    let store: Arc<dyn ResourceStore> = Arc::new(PgResourceStore::new(pool));
    let state = FhirApiState::new(store, registry, config.proxy_mode);

    // The scheduler shares nothing with request handlers except the store.
    let worker_shutdown = if config.sync_enabled {
        let worker = SyncWorker::new(
            state.sync.clone(),
            SyncWorkerConfig {
                interval: Duration::from_secs(config.sync_interval_secs),
            },
        );
        let handle = worker.shutdown_handle();
        tokio::spawn(async move { worker.run().await });
        Some(handle)
    } else {
        info!("Scheduled sync disabled");
        None
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .merge(openapi::openapi_router())
        .nest("/proxy", proxy_router(state.clone()))
        .nest("/sync", sync_router(state));

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Invalid bind address: {e}");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    info!(%addr, "Listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(worker_shutdown))
        .await
    {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Shutdown complete");
}

/// Service liveness probe.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "fhir-proxy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Resolve on SIGINT or SIGTERM and flag the sync worker to stop.
async fn shutdown_signal(worker_shutdown: Option<Arc<AtomicBool>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
    if let Some(flag) = worker_shutdown {
        flag.store(true, Ordering::Relaxed);
    }
}
