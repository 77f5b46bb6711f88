//! DOM extraction for listing and detail pages
//!
//! Extractors are compiled once from a [`crate::ScrapeConfig`] and then run
//! synchronously over the HTML captured by a [`crate::fetcher::PageSource`].

pub mod detail;
pub mod fields;
pub mod fragments;
pub mod listing;
pub mod schema;

pub use detail::DetailExtractor;
pub use fields::{
    CardFields, FieldAssigner, FieldStrategy, LabeledAssigner, PositionalAssigner, PriceParser,
};
pub use fragments::{NoiseFilter, TextScope, collect_fragments};
pub use listing::ListingExtractor;
pub use schema::{ListingPage, ProductCandidate, ProductDetail, ProductRecord};
