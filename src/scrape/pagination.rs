//! The listing loop: load, extract, merge, follow "next" until it runs out.

use std::collections::HashSet;

use tracing::{debug, info, warn};
use url::Url;

use super::catalog::Catalog;
use super::{ScrapeError, ScrapeResult};
use crate::config::ScrapeConfig;
use crate::extract::{ListingExtractor, ProductRecord};
use crate::fetcher::PageSource;

/// Scrape every listing page reachable from the configured start URL.
///
/// Sequential: one page at a time with `page_delay` between loads. Any load
/// error aborts the whole run and discards what was gathered.
pub async fn scrape_listing<S: PageSource>(
    source: &mut S,
    config: &ScrapeConfig,
) -> ScrapeResult<Vec<ProductRecord>> {
    let extractor = ListingExtractor::from_config(config)?;
    let start = Url::parse(config.start_url()).map_err(|e| ScrapeError::InvalidUrl {
        url: config.start_url().to_string(),
        message: e.to_string(),
    })?;

    let mut catalog = Catalog::new();
    let mut visited: HashSet<Url> = HashSet::new();
    let mut next = Some(start);
    let mut page_number: u32 = 0;

    while let Some(url) = next.take() {
        if let Some(max) = config.max_pages()
            && page_number as usize >= max
        {
            info!("Reached page limit of {max}, stopping");
            break;
        }
        if !visited.insert(url.clone()) {
            warn!("Next page {url} was already loaded in this run, stopping");
            break;
        }

        if page_number > 0 && !config.page_delay().is_zero() {
            tokio::time::sleep(config.page_delay()).await;
        }
        page_number += 1;

        info!("Loading page {page_number}: {url}");
        let page = source.load(&url).await?;

        // Html is !Send; extraction finishes before the next await
        let listing = extractor.extract(&page);
        let added = catalog.merge(listing.candidates, page_number);
        debug!(
            "Page {page_number}: {added} new products, {} discarded cards, {} total",
            listing.discarded,
            catalog.len()
        );

        next = listing.next_url;
    }

    info!(
        "Listing scrape finished: {} products across {page_number} pages",
        catalog.len()
    );
    Ok(catalog.into_records())
}
