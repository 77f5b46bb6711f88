//! Configuration module for listing scrapes
//!
//! This module provides the `ScrapeConfig` struct and its type-safe builder
//! for configuring scrape operations with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::{PRODUCT_ID_PLACEHOLDER, ScrapeConfigBuilder, WithStartUrl};
pub use types::ScrapeConfig;
