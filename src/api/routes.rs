//! Router construction.
//!
//! ```text
//! GET /api/search                              - Scrape the full listing
//! GET /api/product-details/{product_id}?image_url=  - Scrape one detail page
//! GET /healthz                                 - Liveness
//! ```

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{AppState, healthz, product_details, search};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", get(search))
        .route("/api/product-details/{product_id}", get(product_details))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        // The browsing frontend is served from a different origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
