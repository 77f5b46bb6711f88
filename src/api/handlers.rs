//! Endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::service::CatalogService;
use crate::extract::{ProductDetail, ProductRecord};
use crate::scrape::{ScrapeError, validate_product_id};

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(service: impl CatalogService + 'static) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// `{"error": "..."}` body for every failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A scrape error on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub ScrapeError);

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Request rejected ({status}): {}", self.0);
        }
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// `GET /api/search`
pub async fn search(State(state): State<AppState>) -> Result<Json<Vec<ProductRecord>>, ApiError> {
    info!("Listing scrape requested");
    let records = state.service.search().await?;
    info!("Returning {} products", records.len());
    Ok(Json(records))
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    pub image_url: Option<String>,
}

/// `GET /api/product-details/{product_id}`
pub async fn product_details(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Result<Json<ProductDetail>, ApiError> {
    let product_id = validate_product_id(&product_id)?;
    let image_url = query.image_url.as_deref().filter(|s| !s.trim().is_empty());

    info!("Detail scrape requested for {product_id}");
    let detail = state.service.product_details(product_id, image_url).await?;
    Ok(Json(detail))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

/// `GET /healthz`
pub async fn healthz() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}
