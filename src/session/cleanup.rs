//! Teardown steps for a browser session
//!
//! Each step is attempted regardless of earlier failures; problems are
//! collected rather than returned so that shutdown always runs to the end.

use std::path::Path;

use chromiumoxide::Browser;
use log::{debug, warn};

/// Outcome of a teardown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupResult {
    Success,
    PartialFailure(Vec<String>),
}

impl CleanupResult {
    fn from_errors(errors: Vec<String>) -> Self {
        if errors.is_empty() {
            Self::Success
        } else {
            Self::PartialFailure(errors)
        }
    }
}

/// Close the browser and wait for its process to exit.
pub async fn close_browser(browser: &mut Browser) -> CleanupResult {
    let mut errors = Vec::new();

    debug!(target: "catalog_scrape::cleanup", "Closing browser");
    if let Err(e) = browser.close().await {
        warn!(target: "catalog_scrape::cleanup", "Failed to close browser: {e}");
        errors.push(format!("Browser close failed: {e}"));
    }

    // Chrome must have released the profile before it can be deleted
    debug!(target: "catalog_scrape::cleanup", "Waiting for browser process to exit");
    if let Err(e) = browser.wait().await {
        warn!(target: "catalog_scrape::cleanup", "Failed to wait for browser exit: {e}");
        errors.push(format!("Browser wait failed: {e}"));
    }

    CleanupResult::from_errors(errors)
}

/// Remove a session profile directory. Blocking; also used from `Drop`.
pub fn remove_profile_dir(path: &Path) -> CleanupResult {
    if !path.exists() {
        return CleanupResult::Success;
    }

    debug!(target: "catalog_scrape::cleanup", "Removing profile directory {}", path.display());
    match std::fs::remove_dir_all(path) {
        Ok(()) => CleanupResult::Success,
        Err(e) => {
            warn!(
                target: "catalog_scrape::cleanup",
                "Failed to remove profile directory {}: {e}. Manual cleanup may be required.",
                path.display()
            );
            CleanupResult::PartialFailure(vec![format!("Directory cleanup failed: {e}")])
        }
    }
}
