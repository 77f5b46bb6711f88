//! Error type shared by every scrape entry point.
//!
//! Every variant is fatal for the scrape that raised it: there is no partial
//! result, retry, or checkpoint.

use thiserror::Error;

/// Convenience alias for Result with `ScrapeError`
pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Chromium could not be found, downloaded or launched
    #[error("Browser error: {0}")]
    Browser(String),

    /// `page.goto()` failed or exceeded its timeout
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// The rendered document could not be read or queried
    #[error("DOM evaluation failed: {0}")]
    Evaluation(String),

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Invalid product id '{0}'")]
    InvalidProductId(String),

    #[error("Product {0} not found")]
    ProductNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        // Use {:#} to preserve full error chain with context
        Self::Browser(format!("{err:#}"))
    }
}

impl ScrapeError {
    /// Whether the caller, rather than the scraper or the target site, is at fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidProductId(_))
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProductNotFound(_))
    }
}
