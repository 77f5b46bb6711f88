//! Router behaviour with an in-memory catalog service

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use catalog_scrape::api::{AppState, CatalogService, ErrorBody, ServiceFuture, create_router};
use catalog_scrape::{ProductDetail, ProductRecord, ScrapeError};
use tower::ServiceExt;

#[derive(Default)]
struct StubService {
    fail_search: bool,
    detail_calls: Arc<AtomicUsize>,
}

fn record(id: &str, page: u32) -> ProductRecord {
    ProductRecord {
        product_id: id.into(),
        origin: "Kenya".into(),
        name: "Avocado".into(),
        size: "1 pc".into(),
        price: "5.00".into(),
        original_price: "7.00".into(),
        image_url: String::new(),
        page,
    }
}

impl CatalogService for StubService {
    fn search(&self) -> ServiceFuture<'_, Vec<ProductRecord>> {
        Box::pin(async move {
            if self.fail_search {
                Err(ScrapeError::Navigation {
                    url: "https://minutes.noon.com/".into(),
                    message: "Page navigation timeout after 30 seconds".into(),
                })
            } else {
                Ok(vec![record("N1", 1), record("N2", 2)])
            }
        })
    }

    fn product_details<'a>(
        &'a self,
        product_id: &'a str,
        image_url: Option<&'a str>,
    ) -> ServiceFuture<'a, ProductDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if product_id == "GONE" {
                return Err(ScrapeError::ProductNotFound(product_id.to_string()));
            }
            Ok(ProductDetail {
                product_id: product_id.to_string(),
                url: format!("https://minutes.noon.com/uae-en/now-product/{product_id}/"),
                name: "Avocado".into(),
                description: String::new(),
                price: "5.00".into(),
                original_price: String::new(),
                image_url: image_url.unwrap_or_default().to_string(),
                images: Vec::new(),
            })
        })
    }
}

fn router(service: StubService) -> Router {
    create_router(AppState::new(service))
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_search_returns_record_array() {
    let (status, body) = get(router(StubService::default()), "/api/search").await;

    assert_eq!(status, StatusCode::OK);
    let records: Vec<ProductRecord> = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(records.len(), 2);

    let keys: Vec<&str> = body[0].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 8);
    assert!(keys.contains(&"original_price") && keys.contains(&"page"));
}

#[tokio::test]
async fn test_search_failure_is_500_with_error() {
    let service = StubService {
        fail_search: true,
        ..StubService::default()
    };
    let (status, body) = get(router(service), "/api/search").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let err: ErrorBody = serde_json::from_value(body).unwrap();
    assert!(err.error.contains("timeout"));
}

#[tokio::test]
async fn test_detail_with_image_hint() {
    let (status, body) = get(
        router(StubService::default()),
        "/api/product-details/N1?image_url=https%3A%2F%2Ff.nooncdn.com%2Fp%2Fa.jpg",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product_id"], "N1");
    assert_eq!(body["image_url"], "https://f.nooncdn.com/p/a.jpg");
}

#[tokio::test]
async fn test_invalid_id_rejected_before_service() {
    let calls = Arc::new(AtomicUsize::new(0));
    let service = StubService {
        detail_calls: calls.clone(),
        ..StubService::default()
    };
    let (status, body) = get(router(service), "/api/product-details/%2E%2E").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid product id"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_product_is_404() {
    let (status, body) = get(router(StubService::default()), "/api/product-details/GONE").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product GONE not found");
}

#[tokio::test]
async fn test_healthz() {
    let (status, body) = get(router(StubService::default()), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"status": "ok"}));
}
