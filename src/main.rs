//! busybeaver - quadrant bilinear interpolation of mesh results over HTTP
//!
//! This is the main entry point for the busybeaver server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tracing::{error, info};

use busybeaver::data_loader::load_mesh;
use busybeaver::handlers::{mark_start, router};
use busybeaver::{init_tracing, log_error, log_operation_end, log_operation_start};
use busybeaver::{BusybeaverError, Config, Result};

fn main() -> Result<()> {
    mark_start();

    let (config, mesh_path) = Config::load()?;
    init_tracing(&config.log_level);

    info!("Starting busybeaver v{}", env!("CARGO_PKG_VERSION"));

    config.validate().map_err(|e| {
        log_error(&e, "validate_config");
        e
    })?;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if let Some(workers) = config.server.workers {
        builder.worker_threads(workers);
    }
    let runtime = builder.enable_all().build()?;

    runtime.block_on(serve(config, mesh_path))
}

async fn serve(config: Config, mesh_path: std::path::PathBuf) -> Result<()> {
    let load_start = Instant::now();
    log_operation_start("load_mesh", Some(&mesh_path.display().to_string()));

    let app_state = load_mesh(&mesh_path, config.clone()).map_err(|e| {
        log_error(&e, "load_mesh");
        e
    })?;

    app_state.validate().map_err(|e| {
        log_error(&e, "validate_state");
        e
    })?;
    log_operation_end("load_mesh", load_start, true);

    info!(
        "Serving item {:?} at time index {} from {} samples",
        app_state.metadata.item, app_state.metadata.time_index, app_state.metadata.sample_count
    );

    let state = Arc::new(app_state);
    let app = router(state);

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| BusybeaverError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| BusybeaverError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BusybeaverError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
