pub mod api;
pub mod browser_setup;
pub mod client;
pub mod config;
pub mod extract;
pub mod fetcher;
pub mod scrape;
pub mod session;
pub mod utils;

pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use client::{CatalogClient, CatalogItem, CatalogView, LoadState, PayloadError};
pub use config::ScrapeConfig;
pub use extract::schema::*;
pub use extract::{FieldStrategy, TextScope};
pub use fetcher::{ChromePageSource, PageSource, RenderedPage};
pub use scrape::{
    ScrapeError, ScrapeResult, scrape_catalog, scrape_detail, scrape_listing,
    scrape_product_details,
};
pub use session::BrowserSession;
