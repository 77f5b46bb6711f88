//! Shared configuration constants for catalog_scrape
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Listing page the scraper starts from when no start URL is configured.
pub const DEFAULT_START_URL: &str =
    "https://minutes.noon.com/uae-en/search/?f[category]=fruits_vegetables";

/// Detail page template; `{product_id}` is substituted per lookup.
pub const DEFAULT_DETAIL_URL_TEMPLATE: &str =
    "https://minutes.noon.com/uae-en/now-product/{product_id}/";

/// Anchors inside the listing grid. Every product card is an `<a>` under this container.
pub const DEFAULT_GRID_SELECTOR: &str = "div.catalogList_instantCatalogList__gUTOP a";

/// Pagination control. The `aria-disabled='false'` clause rejects the greyed-out
/// control rendered on the last page.
pub const DEFAULT_NEXT_PAGE_SELECTOR: &str =
    "a[role='button'][aria-label='Next page'][rel='next'][aria-disabled='false']";

/// Price containers on a product detail page.
pub const DEFAULT_DETAIL_PRICE_SELECTOR: &str = "[class*='price']";

/// Product id capture from a card href.
pub const DEFAULT_PRODUCT_PATH_PATTERN: &str = r"/now-product/([^/]+)/";

/// Image URLs are kept only when their host contains this substring.
pub const TRUSTED_IMAGE_HOST: &str = "f.nooncdn.com";

/// Currency token shown in front of prices.
pub const DEFAULT_CURRENCY: &str = "AED";

/// Badge and button labels that never carry product data.
pub const NOISE_WORDS: [&str; 6] = ["ADD", "OFF", "ON", "SALE", "NEW", "HOT"];

/// A card needs at least this many descriptive fragments to become a record.
pub const MIN_DESCRIPTIVE_FRAGMENTS: usize = 3;

/// Delay between consecutive listing page loads: 2 seconds
///
/// Politeness toward the target and time for client-side rendering to
/// settle before the next navigation. Not a rate limiter.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 2_000;

/// Timeout for `page.goto()`: 30 seconds
pub const DEFAULT_PAGE_LOAD_TIMEOUT_SECS: u64 = 30;

/// Upper bound on the network-idle wait after navigation: 15 seconds
///
/// When exceeded the fetcher proceeds with whatever has rendered.
pub const DEFAULT_SETTLE_TIMEOUT_SECS: u64 = 15;

/// Quiet window for the network-idle heuristic: 500 ms
///
/// The page counts as idle once no new resource entries have appeared
/// for this long.
pub const DEFAULT_NETWORK_QUIET_MS: u64 = 500;

/// Browser sessions allowed to run at once from the HTTP API.
pub const DEFAULT_MAX_CONCURRENT_SESSIONS: usize = 1;

/// Address the API binds to and the client talks to.
pub const DEFAULT_API_ADDR: &str = "127.0.0.1:3001";

/// Chrome user agent string for stealth mode
///
/// Chrome releases new stable versions ~every 4 weeks.
/// Update quarterly to stay within reasonable version window.
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
