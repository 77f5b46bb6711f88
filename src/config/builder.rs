//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! This module provides a fluent builder interface with compile-time validation
//! ensuring that a start URL is set before building a `ScrapeConfig`. Patterns
//! and selectors are compiled once here so a bad value fails at startup rather
//! than on the first request.

use crate::extract::{FieldStrategy, TextScope};
use crate::utils::{
    DEFAULT_CURRENCY, DEFAULT_DETAIL_PRICE_SELECTOR, DEFAULT_DETAIL_URL_TEMPLATE,
    DEFAULT_GRID_SELECTOR, DEFAULT_MAX_CONCURRENT_SESSIONS, DEFAULT_NETWORK_QUIET_MS,
    DEFAULT_NEXT_PAGE_SELECTOR, DEFAULT_PAGE_DELAY_MS, DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
    DEFAULT_PRODUCT_PATH_PATTERN, DEFAULT_SETTLE_TIMEOUT_SECS, DEFAULT_START_URL, NOISE_WORDS,
    TRUSTED_IMAGE_HOST,
};
use anyhow::{Result, anyhow, bail};
use regex::Regex;
use scraper::Selector;
use std::marker::PhantomData;
use std::path::PathBuf;
use url::Url;

use super::types::ScrapeConfig;

/// Placeholder substituted with the product id in detail URLs.
pub const PRODUCT_ID_PLACEHOLDER: &str = "{product_id}";

fn check_selector(name: &str, selector: &str) -> Result<()> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| anyhow!("Invalid {name} selector '{selector}': {e:?}"))
}

// Type states for the builder
pub struct WithStartUrl;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) start_url: Option<String>,
    pub(crate) detail_url_template: String,
    pub(crate) grid_selector: String,
    pub(crate) next_page_selector: String,
    pub(crate) detail_price_selector: String,
    pub(crate) product_path_pattern: String,
    pub(crate) trusted_image_host: String,
    pub(crate) currency: String,
    pub(crate) noise_words: Vec<String>,
    pub(crate) text_scope: TextScope,
    pub(crate) field_strategy: FieldStrategy,
    pub(crate) page_delay_ms: u64,
    pub(crate) max_pages: Option<usize>,
    pub(crate) headless: bool,
    pub(crate) page_load_timeout_secs: u64,
    pub(crate) settle_timeout_secs: u64,
    pub(crate) network_quiet_ms: u64,
    pub(crate) max_concurrent_sessions: usize,
    pub(crate) chrome_data_dir: Option<PathBuf>,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            start_url: None,
            detail_url_template: DEFAULT_DETAIL_URL_TEMPLATE.to_string(),
            grid_selector: DEFAULT_GRID_SELECTOR.to_string(),
            next_page_selector: DEFAULT_NEXT_PAGE_SELECTOR.to_string(),
            detail_price_selector: DEFAULT_DETAIL_PRICE_SELECTOR.to_string(),
            product_path_pattern: DEFAULT_PRODUCT_PATH_PATTERN.to_string(),
            trusted_image_host: TRUSTED_IMAGE_HOST.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            noise_words: NOISE_WORDS.iter().map(|w| (*w).to_string()).collect(),
            text_scope: TextScope::default(),
            field_strategy: FieldStrategy::default(),
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            max_pages: None,
            headless: true,
            page_load_timeout_secs: DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
            settle_timeout_secs: DEFAULT_SETTLE_TIMEOUT_SECS,
            network_quiet_ms: DEFAULT_NETWORK_QUIET_MS,
            max_concurrent_sessions: DEFAULT_MAX_CONCURRENT_SESSIONS,
            chrome_data_dir: None,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

/// The hard-coded fruits & vegetables listing with every other knob at its default.
impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfigBuilder::default().assemble(DEFAULT_START_URL.to_string())
    }
}

impl ScrapeConfigBuilder<()> {
    pub fn start_url(self, url: impl Into<String>) -> ScrapeConfigBuilder<WithStartUrl> {
        let url_string = url.into();

        // Normalize URL: add https:// only when no scheme is present at all.
        // Any other scheme is kept so that build() rejects it.
        let normalized_url = if url_string.contains("://") {
            url_string
        } else {
            format!("https://{url_string}")
        };

        ScrapeConfigBuilder {
            start_url: Some(normalized_url),
            detail_url_template: self.detail_url_template,
            grid_selector: self.grid_selector,
            next_page_selector: self.next_page_selector,
            detail_price_selector: self.detail_price_selector,
            product_path_pattern: self.product_path_pattern,
            trusted_image_host: self.trusted_image_host,
            currency: self.currency,
            noise_words: self.noise_words,
            text_scope: self.text_scope,
            field_strategy: self.field_strategy,
            page_delay_ms: self.page_delay_ms,
            max_pages: self.max_pages,
            headless: self.headless,
            page_load_timeout_secs: self.page_load_timeout_secs,
            settle_timeout_secs: self.settle_timeout_secs,
            network_quiet_ms: self.network_quiet_ms,
            max_concurrent_sessions: self.max_concurrent_sessions,
            chrome_data_dir: self.chrome_data_dir,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when all required fields are set
impl ScrapeConfigBuilder<WithStartUrl> {
    pub fn build(self) -> Result<ScrapeConfig> {
        let start_url = self
            .start_url
            .clone()
            .ok_or_else(|| anyhow!("start_url is required"))?;

        let config = self.assemble(start_url);
        config.validate()?;
        Ok(config)
    }
}

impl ScrapeConfig {
    /// Check the invariants every scrape relies on.
    ///
    /// Runs for builder output and for deserialized configs alike.
    pub fn validate(&self) -> Result<()> {
        let start_url = &self.start_url;
        let parsed =
            Url::parse(start_url).map_err(|e| anyhow!("Invalid start_url '{start_url}': {e}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("start_url must be http or https, got '{}'", parsed.scheme());
        }

        let pattern = Regex::new(&self.product_path_pattern)
            .map_err(|e| anyhow!("Invalid product_path_pattern '{}': {e}", self.product_path_pattern))?;
        if pattern.captures_len() < 2 {
            bail!(
                "product_path_pattern '{}' must capture the product id in group 1",
                self.product_path_pattern
            );
        }

        check_selector("grid", &self.grid_selector)?;
        check_selector("next page", &self.next_page_selector)?;
        check_selector("detail price", &self.detail_price_selector)?;

        if !self.detail_url_template.contains(PRODUCT_ID_PLACEHOLDER) {
            bail!(
                "detail_url_template '{}' has no {PRODUCT_ID_PLACEHOLDER} placeholder",
                self.detail_url_template
            );
        }
        if self.currency.trim().is_empty() {
            bail!("currency must not be empty");
        }
        if self.max_concurrent_sessions == 0 {
            bail!("max_concurrent_sessions must be at least 1");
        }
        if self.max_pages == Some(0) {
            bail!("max_pages must be at least 1 when set");
        }
        if self.network_quiet_ms == 0 {
            bail!("network_quiet_ms must be greater than zero");
        }

        Ok(())
    }
}

impl<State> ScrapeConfigBuilder<State> {
    /// Move the builder's fields into a config without validating them.
    fn assemble(self, start_url: String) -> ScrapeConfig {
        // Enforce headless mode in release builds for production safety
        #[cfg(not(debug_assertions))]
        let headless = if !self.headless {
            tracing::warn!(
                "Forcing headless mode in release build. \
                Headed mode is only available in debug builds for development."
            );
            true
        } else {
            self.headless
        };

        #[cfg(debug_assertions)]
        let headless = self.headless;

        ScrapeConfig {
            start_url,
            detail_url_template: self.detail_url_template,
            grid_selector: self.grid_selector,
            next_page_selector: self.next_page_selector,
            detail_price_selector: self.detail_price_selector,
            product_path_pattern: self.product_path_pattern,
            trusted_image_host: self.trusted_image_host,
            currency: self.currency,
            noise_words: self.noise_words,
            text_scope: self.text_scope,
            field_strategy: self.field_strategy,
            page_delay_ms: self.page_delay_ms,
            max_pages: self.max_pages,
            headless,
            page_load_timeout_secs: self.page_load_timeout_secs,
            settle_timeout_secs: self.settle_timeout_secs,
            network_quiet_ms: self.network_quiet_ms,
            max_concurrent_sessions: self.max_concurrent_sessions,
            chrome_data_dir: self.chrome_data_dir,
        }
    }

    #[must_use]
    pub fn detail_url_template(mut self, template: impl Into<String>) -> Self {
        self.detail_url_template = template.into();
        self
    }

    #[must_use]
    pub fn grid_selector(mut self, selector: impl Into<String>) -> Self {
        self.grid_selector = selector.into();
        self
    }

    #[must_use]
    pub fn next_page_selector(mut self, selector: impl Into<String>) -> Self {
        self.next_page_selector = selector.into();
        self
    }

    #[must_use]
    pub fn detail_price_selector(mut self, selector: impl Into<String>) -> Self {
        self.detail_price_selector = selector.into();
        self
    }

    /// Set the href pattern that identifies product cards
    ///
    /// Capture group 1 must be the product id. Anchors whose href does not
    /// match are skipped without error.
    ///
    /// # Example
    /// ```rust
    /// # use catalog_scrape::config::ScrapeConfig;
    /// # fn main() -> anyhow::Result<()> {
    /// let config = ScrapeConfig::builder()
    ///     .start_url("https://shop.example/listing")
    ///     .product_path_pattern(r"/p/([^/]+)/")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn product_path_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.product_path_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn trusted_image_host(mut self, host: impl Into<String>) -> Self {
        self.trusted_image_host = host.into();
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    #[must_use]
    pub fn noise_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.noise_words = words.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn text_scope(mut self, scope: TextScope) -> Self {
        self.text_scope = scope;
        self
    }

    #[must_use]
    pub fn field_strategy(mut self, strategy: FieldStrategy) -> Self {
        self.field_strategy = strategy;
        self
    }

    /// Set the fixed pause between listing page loads
    ///
    /// # Arguments
    /// * `delay_ms` - Milliseconds to sleep before loading the next page (default: 2000)
    #[must_use]
    pub fn page_delay_ms(mut self, delay_ms: u64) -> Self {
        self.page_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn page_load_timeout_secs(mut self, secs: u64) -> Self {
        self.page_load_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn settle_timeout_secs(mut self, secs: u64) -> Self {
        self.settle_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn network_quiet_ms(mut self, quiet_ms: u64) -> Self {
        self.network_quiet_ms = quiet_ms;
        self
    }

    #[must_use]
    pub fn max_concurrent_sessions(mut self, sessions: usize) -> Self {
        self.max_concurrent_sessions = sessions;
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.chrome_data_dir = Some(dir.into());
        self
    }
}
