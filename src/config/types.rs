//! Core configuration types for listing scrapes
//!
//! This module contains the main `ScrapeConfig` struct that defines what the
//! scraper targets, how it recognises product cards, and how patiently it
//! drives the browser.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::PathBuf;

use crate::extract::{FieldStrategy, TextScope};

/// Main configuration struct for scrape operations
///
/// Deserializing runs the same validation as
/// [`ScrapeConfigBuilder::build`](super::ScrapeConfigBuilder::build), so a
/// config loaded from a file holds the same invariants as a built one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ScrapeConfig {
    /// First listing page of the run.
    ///
    /// **INVARIANT:** an absolute http(s) URL (normalized and checked in builder).
    pub(crate) start_url: String,

    /// Detail page URL with a `{product_id}` placeholder.
    pub(crate) detail_url_template: String,

    /// CSS selector matching every card anchor in the listing grid.
    pub(crate) grid_selector: String,

    /// CSS selector matching an *enabled* next-page control.
    pub(crate) next_page_selector: String,

    /// CSS selector for price containers on a detail page.
    pub(crate) detail_price_selector: String,

    /// Regex applied to card hrefs; capture group 1 is the product id.
    pub(crate) product_path_pattern: String,

    pub(crate) trusted_image_host: String,
    pub(crate) currency: String,
    pub(crate) noise_words: Vec<String>,
    pub(crate) text_scope: TextScope,
    pub(crate) field_strategy: FieldStrategy,

    /// Fixed pause between consecutive page loads.
    pub(crate) page_delay_ms: u64,

    /// Stop after this many listing pages. `None` follows the next link until it disappears.
    pub(crate) max_pages: Option<usize>,

    pub(crate) headless: bool,

    /// Timeout in seconds for `page.goto()` operations
    ///
    /// A navigation that exceeds this is a fatal navigation error.
    ///
    /// Default: 30 seconds
    pub(crate) page_load_timeout_secs: u64,

    /// Upper bound in seconds on the network-idle wait
    ///
    /// Exceeding it is not an error; the page is read as it stands.
    ///
    /// Default: 15 seconds
    pub(crate) settle_timeout_secs: u64,

    /// Quiet window in milliseconds for the network-idle heuristic
    pub(crate) network_quiet_ms: u64,

    /// Browser sessions the HTTP API may run at once
    pub(crate) max_concurrent_sessions: usize,

    /// Parent directory for per-session Chrome profiles.
    ///
    /// Each session creates a uniquely named profile below it and removes it on
    /// shutdown. Defaults to the system temp directory.
    pub(crate) chrome_data_dir: Option<PathBuf>,
}

impl Serialize for ScrapeConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ScrapeConfig::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for ScrapeConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let config = ScrapeConfig::deserialize(deserializer)?;
        config
            .validate()
            .map_err(|e| serde::de::Error::custom(format!("{e:#}")))?;
        Ok(config)
    }
}
