//! Chromium-backed [`PageSource`].

use std::time::Duration;

use chromiumoxide::page::Page;
use tracing::{debug, warn};
use url::Url;

use super::network_idle::wait_for_network_idle;
use super::page_timeout::with_page_timeout;
use super::{PageSource, RenderedPage};
use crate::config::ScrapeConfig;
use crate::scrape::{ScrapeError, ScrapeResult};

/// One browser tab, reused for every load of a scrape.
#[derive(Debug)]
pub struct ChromePageSource {
    page: Page,
    page_load_timeout_secs: u64,
    settle_timeout: Duration,
    network_quiet: Duration,
}

impl ChromePageSource {
    #[must_use]
    pub fn new(page: Page, config: &ScrapeConfig) -> Self {
        Self {
            page,
            page_load_timeout_secs: config.page_load_timeout_secs(),
            settle_timeout: config.settle_timeout(),
            network_quiet: config.network_quiet(),
        }
    }

    async fn navigate(&self, url: &Url) -> ScrapeResult<()> {
        let navigation_error = |e: chromiumoxide::error::CdpError| ScrapeError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        };

        with_page_timeout(
            async {
                self.page
                    .goto(url.as_str())
                    .await
                    .map(|_| ())
                    .map_err(navigation_error)
            },
            self.page_load_timeout_secs,
            url,
            "Page navigation",
        )
        .await?;

        with_page_timeout(
            async {
                self.page
                    .wait_for_navigation()
                    .await
                    .map(|_| ())
                    .map_err(navigation_error)
            },
            self.page_load_timeout_secs,
            url,
            "Page load",
        )
        .await
    }

    /// Where the tab ended up; redirects make this differ from the request.
    async fn current_url(&self, requested: &Url) -> Url {
        match self.page.url().await {
            Ok(Some(current)) => Url::parse(&current).unwrap_or_else(|e| {
                warn!("Page reported unparseable URL {current}: {e}");
                requested.clone()
            }),
            Ok(None) => requested.clone(),
            Err(e) => {
                debug!("Failed to read page URL: {e}");
                requested.clone()
            }
        }
    }

    pub async fn close(self) {
        if let Err(e) = self.page.close().await {
            debug!("Failed to close page: {e}");
        }
    }
}

impl PageSource for ChromePageSource {
    async fn load(&mut self, url: &Url) -> ScrapeResult<RenderedPage> {
        self.navigate(url).await?;
        wait_for_network_idle(&self.page, self.settle_timeout, self.network_quiet).await;

        let html = self
            .page
            .content()
            .await
            .map_err(|e| ScrapeError::Evaluation(format!("Failed to read document of {url}: {e}")))?;

        Ok(RenderedPage {
            url: self.current_url(url).await,
            html,
        })
    }
}
