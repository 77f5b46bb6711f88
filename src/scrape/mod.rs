//! Scrape entry points
//!
//! [`scrape_catalog`] and [`scrape_product_details`] own the browser: each
//! launches a [`BrowserSession`], runs the browser-agnostic loop from
//! [`pagination`] or [`detail`] against it, and shuts the session down on
//! every path.

pub mod catalog;
pub mod detail;
pub mod pagination;
pub mod scrape_types;

use std::future::Future;

use tracing::error;

use crate::config::ScrapeConfig;
use crate::extract::{ProductDetail, ProductRecord};
use crate::fetcher::ChromePageSource;
use crate::session::BrowserSession;

pub use catalog::Catalog;
pub use detail::{scrape_detail, validate_product_id};
pub use pagination::scrape_listing;
pub use scrape_types::{ScrapeError, ScrapeResult};

/// Run `job` against a fresh browser tab, then tear the session down
/// whatever the outcome.
async fn with_session<T, F, Fut>(config: &ScrapeConfig, job: F) -> ScrapeResult<T>
where
    F: FnOnce(ChromePageSource) -> Fut,
    Fut: Future<Output = (ChromePageSource, ScrapeResult<T>)>,
{
    let session = BrowserSession::launch(config).await?;

    let result = match session.page_source(config).await {
        Ok(source) => {
            let (source, result) = job(source).await;
            source.close().await;
            result
        }
        Err(e) => Err(e),
    };

    session.shutdown().await;
    if let Err(e) = &result {
        error!("Scrape failed: {e}");
    }
    result
}

/// Scrape the whole listing behind `config.start_url()`.
pub async fn scrape_catalog(config: &ScrapeConfig) -> ScrapeResult<Vec<ProductRecord>> {
    with_session(config, |mut source| async move {
        let result = scrape_listing(&mut source, config).await;
        (source, result)
    })
    .await
}

/// Look up one product's detail page.
///
/// The id is validated before a browser is started.
pub async fn scrape_product_details(
    config: &ScrapeConfig,
    product_id: &str,
    image_url: Option<&str>,
) -> ScrapeResult<ProductDetail> {
    let product_id = validate_product_id(product_id)?;

    with_session(config, |mut source| async move {
        let result = scrape_detail(&mut source, config, product_id, image_url).await;
        (source, result)
    })
    .await
}
