//! Scoped browser session
//!
//! A [`BrowserSession`] owns one Chromium process, the task driving its CDP
//! connection, and a profile directory unique to the session. Callers are
//! expected to finish with [`BrowserSession::shutdown`]; if that never runs
//! (early return through a panic, a dropped future), `Drop` aborts the
//! handler and removes the profile directory, and chromiumoxide kills the
//! child process.

pub mod cleanup;

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::Browser;
use chromiumoxide::page::Page;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::browser_setup::launch_browser;
use crate::config::ScrapeConfig;
use crate::fetcher::ChromePageSource;
use crate::scrape::{ScrapeError, ScrapeResult};
use cleanup::{CleanupResult, close_browser, remove_profile_dir};

pub struct BrowserSession {
    id: Uuid,
    browser: Browser,
    handler: JoinHandle<()>,
    profile_dir: Option<PathBuf>,
}

impl std::fmt::Debug for BrowserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserSession")
            .field("id", &self.id)
            .field("profile_dir", &self.profile_dir)
            .finish_non_exhaustive()
    }
}

/// Profile directory for one session, under `base` or the system temp dir.
#[must_use]
pub fn session_profile_dir(base: Option<&PathBuf>, id: Uuid) -> PathBuf {
    base.cloned()
        .unwrap_or_else(std::env::temp_dir)
        .join(format!("catalog_scrape_{id}"))
}

impl BrowserSession {
    /// Start Chromium with a fresh profile directory.
    pub async fn launch(config: &ScrapeConfig) -> ScrapeResult<Self> {
        let id = Uuid::new_v4();
        let profile_dir = session_profile_dir(config.chrome_data_dir(), id);

        let request_timeout = Duration::from_secs(config.page_load_timeout_secs());
        let (browser, handler) =
            match launch_browser(config.headless(), &profile_dir, request_timeout).await {
                Ok(launched) => launched,
                Err(e) => {
                    remove_profile_dir(&profile_dir);
                    return Err(e.into());
                }
            };

        info!("Browser session {id} started");
        Ok(Self {
            id,
            browser,
            handler,
            profile_dir: Some(profile_dir),
        })
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub async fn new_page(&self) -> ScrapeResult<Page> {
        self.browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to create page: {e}")))
    }

    /// A page source bound to a new tab, using the config's timeouts.
    pub async fn page_source(&self, config: &ScrapeConfig) -> ScrapeResult<ChromePageSource> {
        Ok(ChromePageSource::new(self.new_page().await?, config))
    }

    /// Close the browser, stop the handler and delete the profile.
    pub async fn shutdown(mut self) -> CleanupResult {
        info!("Shutting down browser session {}", self.id);

        let mut errors = Vec::new();
        if let CleanupResult::PartialFailure(mut e) = close_browser(&mut self.browser).await {
            errors.append(&mut e);
        }

        self.handler.abort();

        if let Some(dir) = self.profile_dir.take()
            && let CleanupResult::PartialFailure(mut e) = remove_profile_dir(&dir)
        {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            CleanupResult::Success
        } else {
            warn!("Browser session {} shut down with errors: {errors:?}", self.id);
            CleanupResult::PartialFailure(errors)
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();

        if let Some(dir) = self.profile_dir.take() {
            warn!(
                "Browser session {} dropped without shutdown, removing profile in Drop",
                self.id
            );
            remove_profile_dir(&dir);
        }
    }
}
