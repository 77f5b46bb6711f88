//! Product detail lookup.

use std::sync::LazyLock;

use regex::Regex;
use tracing::info;
use url::Url;

use super::{ScrapeError, ScrapeResult};
use crate::config::ScrapeConfig;
use crate::extract::{DetailExtractor, ProductDetail};
use crate::fetcher::PageSource;

static PRODUCT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+$").expect("PRODUCT_ID: hardcoded regex is valid")
});

/// Reject ids that could escape the detail URL path.
pub fn validate_product_id(product_id: &str) -> ScrapeResult<&str> {
    let trimmed = product_id.trim();
    if PRODUCT_ID.is_match(trimmed) && trimmed != "." && trimmed != ".." {
        Ok(trimmed)
    } else {
        Err(ScrapeError::InvalidProductId(product_id.to_string()))
    }
}

/// Detail URL for an already validated id.
pub fn detail_url(config: &ScrapeConfig, product_id: &str) -> ScrapeResult<Url> {
    let raw = config.detail_url_for(product_id);
    Url::parse(&raw).map_err(|e| ScrapeError::InvalidUrl {
        url: raw,
        message: e.to_string(),
    })
}

/// Load and extract one product's detail page.
pub async fn scrape_detail<S: PageSource>(
    source: &mut S,
    config: &ScrapeConfig,
    product_id: &str,
    image_url: Option<&str>,
) -> ScrapeResult<ProductDetail> {
    let product_id = validate_product_id(product_id)?;
    let extractor = DetailExtractor::from_config(config)?;
    let url = detail_url(config, product_id)?;

    info!("Loading product {product_id}: {url}");
    let page = source.load(&url).await?;
    extractor.extract(&page, product_id, image_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_id() {
        for ok in ["N12345678A", "Z1F0.3_x-9", " N1 "] {
            assert!(validate_product_id(ok).is_ok(), "{ok}");
        }
        for bad in ["", "..", "a/b", "N1?x=1", "N1#frag", "%2e%2e"] {
            assert!(validate_product_id(bad).unwrap_err().is_client_error(), "{bad}");
        }
    }

    #[test]
    fn test_detail_url_from_template() {
        let url = detail_url(&ScrapeConfig::default(), "N42").unwrap();
        assert_eq!(url.as_str(), "https://minutes.noon.com/uae-en/now-product/N42/");
    }
}
