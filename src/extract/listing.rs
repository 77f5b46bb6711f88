//! Listing page extraction
//!
//! Turns one rendered listing page into product candidates plus the target
//! of the next-page control. Everything here is synchronous: `scraper::Html`
//! is not `Send` and must not live across an `.await`.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};
use url::Url;

use super::fields::FieldAssigner;
use super::fragments::{NoiseFilter, TextScope, collect_fragments};
use super::schema::{ListingPage, ProductCandidate};
use crate::config::ScrapeConfig;
use crate::fetcher::RenderedPage;
use crate::scrape::{ScrapeError, ScrapeResult};
use crate::utils::{resolve_link, trusted_image_url};

/// Compiled form of the listing-related parts of a [`ScrapeConfig`].
pub struct ListingExtractor {
    grid: Selector,
    next_page: Selector,
    image: Selector,
    product_path: Regex,
    trusted_image_host: String,
    text_scope: TextScope,
    noise: NoiseFilter,
    assigner: Box<dyn FieldAssigner>,
}

impl std::fmt::Debug for ListingExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingExtractor")
            .field("product_path", &self.product_path.as_str())
            .field("trusted_image_host", &self.trusted_image_host)
            .field("text_scope", &self.text_scope)
            .finish_non_exhaustive()
    }
}

fn parse_selector(css: &str) -> ScrapeResult<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Config(format!("Invalid selector '{css}': {e:?}")))
}

impl ListingExtractor {
    /// Compile selectors and patterns once per scrape.
    pub fn from_config(config: &ScrapeConfig) -> ScrapeResult<Self> {
        let product_path = Regex::new(config.product_path_pattern()).map_err(|e| {
            ScrapeError::Config(format!(
                "Invalid product path pattern '{}': {e}",
                config.product_path_pattern()
            ))
        })?;

        Ok(Self {
            grid: parse_selector(config.grid_selector())?,
            next_page: parse_selector(config.next_page_selector())?,
            image: parse_selector("img")?,
            product_path,
            trusted_image_host: config.trusted_image_host().to_string(),
            text_scope: config.text_scope(),
            noise: NoiseFilter::new(config.noise_words()),
            assigner: config.field_strategy().assigner(config.currency()),
        })
    }

    /// Extract every qualifying card in document order, duplicates included.
    #[must_use]
    pub fn extract(&self, page: &RenderedPage) -> ListingPage {
        let document = Html::parse_document(&page.html);
        let mut listing = ListingPage::default();

        for anchor in document.select(&self.grid) {
            let Some(product_id) = self.product_id_of(anchor) else {
                trace!("Skipping grid anchor without product path");
                continue;
            };

            let fragments = self
                .noise
                .retain(collect_fragments(anchor, self.text_scope));

            let Some(fields) = self.assigner.assign(&fragments) else {
                debug!(
                    "Discarding card {product_id}: {} usable fragments",
                    fragments.len()
                );
                listing.discarded += 1;
                continue;
            };

            listing.candidates.push(ProductCandidate {
                image_url: self.image_of(anchor, &page.url),
                product_id,
                origin: fields.origin,
                name: fields.name,
                size: fields.size,
                price: fields.price,
                original_price: fields.original_price,
            });
        }

        listing.next_url = document
            .select(&self.next_page)
            .next()
            .and_then(|control| control.value().attr("href"))
            .and_then(|href| resolve_link(&page.url, href));

        listing
    }

    fn product_id_of(&self, anchor: ElementRef<'_>) -> Option<String> {
        let href = anchor.value().attr("href")?;
        self.product_path
            .captures(href)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|id| !id.is_empty())
    }

    fn image_of(&self, anchor: ElementRef<'_>, base: &Url) -> String {
        let src = anchor
            .select(&self.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .and_then(|src| resolve_link(base, src));
        trusted_image_url(src.as_ref().map(Url::as_str), &self.trusted_image_host)
    }
}
