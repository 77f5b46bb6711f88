//! Getter methods for `ScrapeConfig`
//!
//! This module provides all the accessor methods for retrieving configuration
//! values from a `ScrapeConfig` instance.

use std::path::PathBuf;
use std::time::Duration;

use super::builder::PRODUCT_ID_PLACEHOLDER;
use super::types::ScrapeConfig;
use crate::extract::{FieldStrategy, TextScope};

impl ScrapeConfig {
    #[must_use]
    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    #[must_use]
    pub fn detail_url_template(&self) -> &str {
        &self.detail_url_template
    }

    /// Detail page URL for one product id.
    #[must_use]
    pub fn detail_url_for(&self, product_id: &str) -> String {
        self.detail_url_template
            .replace(PRODUCT_ID_PLACEHOLDER, product_id)
    }

    #[must_use]
    pub fn grid_selector(&self) -> &str {
        &self.grid_selector
    }

    #[must_use]
    pub fn next_page_selector(&self) -> &str {
        &self.next_page_selector
    }

    #[must_use]
    pub fn detail_price_selector(&self) -> &str {
        &self.detail_price_selector
    }

    #[must_use]
    pub fn product_path_pattern(&self) -> &str {
        &self.product_path_pattern
    }

    #[must_use]
    pub fn trusted_image_host(&self) -> &str {
        &self.trusted_image_host
    }

    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    #[must_use]
    pub fn noise_words(&self) -> &[String] {
        &self.noise_words
    }

    #[must_use]
    pub fn text_scope(&self) -> TextScope {
        self.text_scope
    }

    #[must_use]
    pub fn field_strategy(&self) -> FieldStrategy {
        self.field_strategy
    }

    #[must_use]
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    #[must_use]
    pub fn max_pages(&self) -> Option<usize> {
        self.max_pages
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn page_load_timeout_secs(&self) -> u64 {
        self.page_load_timeout_secs
    }

    #[must_use]
    pub fn settle_timeout(&self) -> Duration {
        Duration::from_secs(self.settle_timeout_secs)
    }

    #[must_use]
    pub fn network_quiet(&self) -> Duration {
        Duration::from_millis(self.network_quiet_ms)
    }

    #[must_use]
    pub fn max_concurrent_sessions(&self) -> usize {
        self.max_concurrent_sessions
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }
}
