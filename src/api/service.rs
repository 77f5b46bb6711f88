//! What the HTTP layer calls into.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::config::ScrapeConfig;
use crate::extract::{ProductDetail, ProductRecord};
use crate::scrape::{ScrapeError, ScrapeResult, scrape_catalog, scrape_product_details};

/// Boxed future returned by [`CatalogService`] methods.
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = ScrapeResult<T>> + Send + 'a>>;

/// Backend for the catalog endpoints.
///
/// Object safe so the router can be exercised against an in-memory stub.
pub trait CatalogService: Send + Sync {
    fn search(&self) -> ServiceFuture<'_, Vec<ProductRecord>>;

    fn product_details<'a>(
        &'a self,
        product_id: &'a str,
        image_url: Option<&'a str>,
    ) -> ServiceFuture<'a, ProductDetail>;
}

/// Scrapes live with Chromium, one browser per request.
///
/// At most `max_concurrent_sessions` browsers run at once; further requests
/// wait for a permit.
#[derive(Debug, Clone)]
pub struct ChromeCatalogService {
    config: Arc<ScrapeConfig>,
    permits: Arc<Semaphore>,
}

impl ChromeCatalogService {
    #[must_use]
    pub fn new(config: ScrapeConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_concurrent_sessions()));
        Self {
            config: Arc::new(config),
            permits,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    #[must_use]
    pub fn available_sessions(&self) -> usize {
        self.permits.available_permits()
    }
}

impl CatalogService for ChromeCatalogService {
    fn search(&self) -> ServiceFuture<'_, Vec<ProductRecord>> {
        Box::pin(async move {
            let _permit = self
                .permits
                .acquire()
                .await
                .map_err(|_| ScrapeError::Browser("Session pool closed".into()))?;
            debug!("Acquired browser permit for listing scrape");
            scrape_catalog(&self.config).await
        })
    }

    fn product_details<'a>(
        &'a self,
        product_id: &'a str,
        image_url: Option<&'a str>,
    ) -> ServiceFuture<'a, ProductDetail> {
        Box::pin(async move {
            let _permit = self
                .permits
                .acquire()
                .await
                .map_err(|_| ScrapeError::Browser("Session pool closed".into()))?;
            debug!("Acquired browser permit for product {product_id}");
            scrape_product_details(&self.config, product_id, image_url).await
        })
    }
}
