//! Settle wait after navigation
//!
//! `goto()` resolves once the main document has loaded, but the storefront
//! renders its product grid from XHR responses afterwards. The page counts as
//! settled when `document.readyState` is `complete` and the resource timing
//! entries (their count and the latest `responseEnd`) have not changed for one
//! quiet window. The first probe enlarges the resource timing buffer, which
//! stops recording at 250 entries by default.

use std::time::{Duration, Instant};

use chromiumoxide::page::Page;
use serde::Deserialize;
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

const PROBE_SCRIPT: &str = r"
    (function() {
        if (!window.__catalogScrapeBufferSized) {
            performance.setResourceTimingBufferSize(10000);
            window.__catalogScrapeBufferSized = true;
        }
        const entries = performance.getEntriesByType('resource');
        let lastResponseEnd = 0;
        for (const entry of entries) {
            lastResponseEnd = Math.max(lastResponseEnd, entry.responseEnd);
        }
        return {
            readyState: document.readyState,
            resources: entries.length,
            lastResponseEnd: Math.floor(lastResponseEnd)
        };
    })()
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    pub complete: bool,
    pub resources: u64,
    /// Latest `responseEnd` in whole milliseconds; moves even when the
    /// entry count is capped
    pub last_response_end: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProbe {
    ready_state: String,
    resources: u64,
    last_response_end: u64,
}

/// Tracks consecutive probes until the network has been quiet long enough.
#[derive(Debug)]
pub struct QuietTracker {
    quiet_window: Duration,
    last_activity: Option<(u64, u64)>,
    quiet_since: Option<Instant>,
}

impl QuietTracker {
    #[must_use]
    pub fn new(quiet_window: Duration) -> Self {
        Self {
            quiet_window,
            last_activity: None,
            quiet_since: None,
        }
    }

    /// Feed one probe taken at `now`; returns whether the page has settled.
    pub fn observe(&mut self, probe: Probe, now: Instant) -> bool {
        if !probe.complete {
            self.last_activity = None;
            self.quiet_since = None;
            return false;
        }

        let activity = (probe.resources, probe.last_response_end);
        if self.last_activity == Some(activity) {
            let since = *self.quiet_since.get_or_insert(now);
            now.duration_since(since) >= self.quiet_window
        } else {
            self.last_activity = Some(activity);
            self.quiet_since = Some(now);
            false
        }
    }
}

async fn probe(page: &Page) -> Option<Probe> {
    match page.evaluate(PROBE_SCRIPT).await {
        Ok(result) => match result.into_value::<RawProbe>() {
            Ok(raw) => Some(Probe {
                complete: raw.ready_state == "complete",
                resources: raw.resources,
                last_response_end: raw.last_response_end,
            }),
            Err(e) => {
                debug!("Unexpected settle probe result: {e}");
                None
            }
        },
        Err(e) => {
            debug!("Failed to probe page state: {e}, retrying");
            None
        }
    }
}

/// Wait until the page is settled or `max_wait` elapses.
///
/// Never fails: on timeout the page is used as it is, which matches what a
/// user would see if they stopped waiting.
pub async fn wait_for_network_idle(page: &Page, max_wait: Duration, quiet_window: Duration) {
    let start = Instant::now();
    let mut tracker = QuietTracker::new(quiet_window);

    loop {
        if start.elapsed() >= max_wait {
            warn!(
                "Page did not settle within {}s, proceeding anyway",
                max_wait.as_secs()
            );
            return;
        }

        if let Some(p) = probe(page).await
            && tracker.observe(p, Instant::now())
        {
            debug!("Page settled after {:.2}s", start.elapsed().as_secs_f64());
            return;
        }

        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
