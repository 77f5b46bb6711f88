//! Page fetching
//!
//! A [`PageSource`] turns a URL into the serialized DOM of the fully rendered
//! page. The scrape loops only see this trait; production runs use
//! [`ChromePageSource`], tests use an in-memory map.

pub mod chrome;
pub mod network_idle;
pub mod page_timeout;

use std::future::Future;

use url::Url;

use crate::scrape::ScrapeResult;

pub use chrome::ChromePageSource;
pub use page_timeout::with_page_timeout;

/// HTML of a page after client-side rendering settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Final URL after redirects; relative links resolve against it
    pub url: Url,
    pub html: String,
}

pub trait PageSource {
    /// Navigate to `url`, wait for it to settle and capture its DOM.
    ///
    /// Navigation failures and timeouts are `ScrapeError::Navigation`; a
    /// document that cannot be read is `ScrapeError::Evaluation`.
    fn load(&mut self, url: &Url) -> impl Future<Output = ScrapeResult<RenderedPage>> + Send;
}
