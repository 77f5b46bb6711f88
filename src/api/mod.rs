//! HTTP API over the scrapers.

pub mod handlers;
pub mod routes;
pub mod service;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

pub use handlers::{AppState, ErrorBody, Health};
pub use routes::create_router;
pub use service::{CatalogService, ChromeCatalogService, ServiceFuture};

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, service: impl CatalogService + 'static) -> Result<()> {
    let app = create_router(AppState::new(service));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Catalog API listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => {
                    warn!("Cannot listen for Ctrl-C ({e}), serving until killed");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await
        .context("HTTP server failed")?;
    Ok(())
}
