//! vg-server: HTTP edge of the video gateway.
//!
//! Accepts multipart uploads and byte-range playback requests and bridges
//! them onto the streaming backend calls exposed by `vg-rpc`. Also forwards
//! user record CRUD, serves optional static assets, and shuts down
//! gracefully on SIGINT/SIGTERM.

pub mod bridge;
pub mod context;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;

use std::future::Future;

use tokio::net::TcpListener;
use tokio::signal;

use vg_core::config::Config;

use crate::context::AppContext;

/// Start the gateway.
///
/// Builds the backend channel (lazily connected), binds the configured
/// address, and serves until a shutdown signal is received.
pub async fn start(config: Config) -> vg_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let host = config.server.host.clone();
    let port = config.server.port;
    let ctx = AppContext::from_config(config)?;

    let listener = TcpListener::bind((host.as_str(), port))
        .await
        .map_err(|e| vg_core::Error::Internal(format!("Failed to bind to {host}:{port}: {e}")))?;

    serve(listener, ctx, shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Serve the router on an already-bound listener until `shutdown` resolves.
///
/// In-flight requests are allowed to finish after `shutdown` fires.
pub async fn serve<F>(listener: TcpListener, ctx: AppContext, shutdown: F) -> vg_core::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    let app = router::build_router(ctx);

    tracing::info!("Starting server on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}
