//! Fixtures shared by the integration tests

use std::collections::HashMap;

use catalog_scrape::{PageSource, RenderedPage, ScrapeError, ScrapeResult, ScrapeConfig};
use mockito::{Mock, Server};
use tokio::time::Instant;
use url::Url;

pub const LISTING_URL: &str = "https://minutes.noon.com/uae-en/search/?f[category]=fruits_vegetables";

/// One product card as the storefront renders it.
#[allow(dead_code)]
pub fn card_html(product_id: &str, image: &str, texts: &[&str]) -> String {
    let spans: String = texts
        .iter()
        .map(|t| format!(r#"<div class="productInfo"><span>{t}</span></div>"#))
        .collect();
    format!(
        r#"<a href="/uae-en/now-product/{product_id}/p/?o={product_id}-1">
            <div class="imageContainer"><img src="{image}" alt=""></div>
            {spans}
        </a>"#
    )
}

/// A listing page with `cards` in the grid and, when `next` is given, an
/// enabled next-page control pointing at it.
#[allow(dead_code)]
pub fn listing_html(cards: &[String], next: Option<&str>) -> String {
    let pagination = match next {
        Some(href) => format!(
            r#"<a role="button" aria-label="Next page" rel="next" aria-disabled="false" href="{href}">›</a>"#
        ),
        None => r#"<a role="button" aria-label="Next page" rel="next" aria-disabled="true">›</a>"#
            .to_string(),
    };
    page_html(cards, &format!(r#"<nav class="pagination">{pagination}</nav>"#))
}

/// A listing page that has no pagination control at all.
#[allow(dead_code)]
pub fn listing_html_without_pagination(cards: &[String]) -> String {
    page_html(cards, "")
}

fn page_html(cards: &[String], footer: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><title>Fruits &amp; Vegetables</title></head>
<body>
    <div class="catalogList_instantCatalogList__gUTOP">{}</div>
    {footer}
</body>
</html>"#,
        cards.join("\n")
    )
}

/// Serves pre-rendered pages from memory and records every load.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct MemoryPages {
    pages: HashMap<String, String>,
    pub loads: Vec<String>,
    /// When each load started, on tokio's clock
    pub load_times: Vec<Instant>,
}

#[allow(dead_code)]
impl MemoryPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: String) -> Self {
        let key = Url::parse(url).expect("fixture URL").to_string();
        self.pages.insert(key, html);
        self
    }
}

impl PageSource for MemoryPages {
    async fn load(&mut self, url: &Url) -> ScrapeResult<RenderedPage> {
        self.loads.push(url.to_string());
        self.load_times.push(Instant::now());
        match self.pages.get(url.as_str()) {
            Some(html) => Ok(RenderedPage {
                url: url.clone(),
                html: html.clone(),
            }),
            None => Err(ScrapeError::Navigation {
                url: url.to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            }),
        }
    }
}

/// Default config without the politeness delay.
#[allow(dead_code)]
pub fn fast_config() -> ScrapeConfig {
    ScrapeConfig::builder()
        .start_url(LISTING_URL)
        .page_delay_ms(0)
        .build()
        .expect("valid test config")
}

/// Creates a mock endpoint that returns a body with the given content type
#[allow(dead_code)]
pub async fn create_body_mock(
    server: &mut Server,
    path: &str,
    status: usize,
    content_type: &str,
    body: &str,
) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", content_type)
        .with_body(body)
        .create_async()
        .await
}
