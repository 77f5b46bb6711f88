//! Load state machine and search view for the catalog consumer.

use tracing::{info, warn};

use super::payload::{CatalogItem, PayloadError};
use super::sample_data::sample_items;

/// Where a catalog load stands.
///
/// There is no blank state: a load always ends in real data, sample data or
/// an error that can be retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    LoadedReal(Vec<CatalogItem>),
    LoadedFallback {
        items: Vec<CatalogItem>,
        reason: String,
    },
    Error(String),
}

/// What a grid cell shows for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Card<'a> {
    Product {
        product_id: &'a str,
        name: &'a str,
        size: &'a str,
        price: &'a str,
        /// Empty when the item is not discounted
        original_price: &'a str,
        image_url: &'a str,
    },
    /// An item without a product id; shown greyed out and cannot be opened.
    MissingId,
}

impl<'a> From<&'a CatalogItem> for Card<'a> {
    fn from(item: &'a CatalogItem) -> Self {
        match item.product_id.as_deref() {
            Some(id) if item.is_viewable() => Card::Product {
                product_id: id,
                name: item.display_name(),
                size: &item.size,
                price: &item.price,
                original_price: &item.original_price,
                image_url: &item.image_url,
            },
            _ => Card::MissingId,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogView {
    state: LoadState,
    search_term: String,
    fallback_enabled: bool,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CatalogView {
    /// A view in `Loading`, as it is before the first response arrives.
    #[must_use]
    pub fn new(fallback_enabled: bool) -> Self {
        Self {
            state: LoadState::Loading,
            search_term: String::new(),
            fallback_enabled,
        }
    }

    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn begin_load(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Settle the pending load with its outcome.
    pub fn resolve(&mut self, outcome: Result<Vec<CatalogItem>, PayloadError>) {
        self.state = match outcome {
            Ok(items) => {
                info!("Loaded {} catalog items", items.len());
                LoadState::LoadedReal(items)
            }
            Err(e) if self.fallback_enabled => {
                warn!("API server not available, using sample data: {e}");
                LoadState::LoadedFallback {
                    items: sample_items(),
                    reason: e.to_string(),
                }
            }
            Err(e) => {
                warn!("Catalog load failed: {e}");
                LoadState::Error(e.to_string())
            }
        };
    }

    /// Restart a failed load. Returns false (and does nothing) otherwise.
    pub fn retry(&mut self) -> bool {
        if self.can_retry() {
            self.begin_load();
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn can_retry(&self) -> bool {
        matches!(self.state, LoadState::Error(_))
    }

    #[must_use]
    pub fn using_sample_data(&self) -> bool {
        matches!(self.state, LoadState::LoadedFallback { .. })
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(
            self.state,
            LoadState::LoadedReal(_) | LoadState::LoadedFallback { .. }
        )
    }

    /// Search input is only usable once there is something to search.
    #[must_use]
    pub fn search_enabled(&self) -> bool {
        self.is_loaded()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        match &self.state {
            LoadState::LoadedReal(items) | LoadState::LoadedFallback { items, .. } => items,
            LoadState::Loading | LoadState::Error(_) => &[],
        }
    }

    /// Items matching the search term on name (or origin) or size.
    ///
    /// A blank term shows everything. Otherwise the term is matched as typed,
    /// surrounding spaces included.
    #[must_use]
    pub fn filtered(&self) -> Vec<&CatalogItem> {
        let blank = self.search_term.trim().is_empty();
        let term = self.search_term.to_lowercase();
        self.items()
            .iter()
            .filter(|item| {
                blank
                    || item.display_name().to_lowercase().contains(&term)
                    || item.size.to_lowercase().contains(&term)
            })
            .collect()
    }

    #[must_use]
    pub fn cards(&self) -> Vec<Card<'_>> {
        self.filtered().into_iter().map(Card::from).collect()
    }

    /// The status line above the grid.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        match &self.state {
            LoadState::Loading => None,
            LoadState::Error(message) => Some(message.clone()),
            LoadState::LoadedReal(_) | LoadState::LoadedFallback { .. } => Some(format!(
                "Showing {} of {} items",
                self.filtered().len(),
                self.items().len()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: Option<&str>, origin: &str, name: &str, size: &str) -> CatalogItem {
        CatalogItem {
            product_id: id.map(str::to_string),
            origin: origin.into(),
            name: name.into(),
            size: size.into(),
            ..CatalogItem::default()
        }
    }

    fn loaded(items: Vec<CatalogItem>) -> CatalogView {
        let mut view = CatalogView::default();
        view.resolve(Ok(items));
        view
    }

    #[test]
    fn test_starts_loading_with_search_disabled() {
        let view = CatalogView::default();
        assert_eq!(view.state(), &LoadState::Loading);
        assert!(!view.search_enabled());
        assert_eq!(view.summary(), None);
    }

    #[test]
    fn test_failure_falls_back_to_sample_data() {
        let mut view = CatalogView::default();
        view.resolve(Err(PayloadError::HtmlDocument));
        assert!(view.using_sample_data());
        assert!(view.search_enabled());
        assert!(!view.items().is_empty());
        assert!(!view.can_retry());
    }

    #[test]
    fn test_failure_without_fallback_is_retryable() {
        let mut view = CatalogView::new(false);
        view.resolve(Err(PayloadError::HttpStatus(500)));
        assert!(matches!(view.state(), LoadState::Error(_)));
        assert_eq!(view.summary().as_deref(), Some("HTTP error! status: 500"));

        assert!(view.retry());
        assert_eq!(view.state(), &LoadState::Loading);
        assert!(!view.retry());
    }

    #[test]
    fn test_filter_matches_name_origin_and_size() {
        let mut view = loaded(vec![
            item(Some("1"), "Kenya", "Avocado", "1 pc"),
            item(Some("2"), "Spain", "", "1 kg"),
            item(Some("3"), "UAE", "Tomato", "500 g"),
        ]);

        view.set_search_term("AVO");
        assert_eq!(view.filtered().len(), 1);
        // Spaces are part of the term
        view.set_search_term("avocado ");
        assert!(view.filtered().is_empty());
        view.set_search_term("1 k");
        assert_eq!(view.filtered().len(), 1);

        // Origin only counts when the name is empty
        view.set_search_term("spain");
        assert_eq!(view.filtered().len(), 1);
        view.set_search_term("kenya");
        assert!(view.filtered().is_empty());

        view.set_search_term("kg");
        assert_eq!(view.filtered()[0].product_id.as_deref(), Some("2"));
        assert_eq!(view.summary().as_deref(), Some("Showing 1 of 3 items"));

        view.set_search_term("   ");
        assert_eq!(view.filtered().len(), 3);
    }

    #[test]
    fn test_missing_id_renders_placeholder() {
        let view = loaded(vec![
            item(None, "", "Ghost", ""),
            item(Some(""), "", "Blank id", ""),
            item(Some("N1"), "Kenya", "Avocado", "1 pc"),
        ]);
        let cards = view.cards();
        assert_eq!(cards[0], Card::MissingId);
        assert_eq!(cards[1], Card::MissingId);
        assert!(matches!(cards[2], Card::Product { product_id: "N1", name: "Avocado", .. }));
    }
}
