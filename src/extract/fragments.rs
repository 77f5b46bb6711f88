//! Text fragment collection and noise filtering for product cards
//!
//! A product card is an anchor whose descendants hold the origin, name, size
//! and price as loose text. This module turns that subtree into an ordered
//! list of trimmed fragments and drops the badge/button noise around them.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};

/// Bare one- or two-digit numbers: quantity steppers, rating counts.
static SHORT_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}$").expect("SHORT_NUMBER: hardcoded regex is valid")
});

/// One- or two-letter tokens: unit abbreviations and icon ligatures.
static SHORT_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{1,2}$").expect("SHORT_WORD: hardcoded regex is valid")
});

/// Which text a card's descendants contribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextScope {
    /// Full `textContent` of every descendant element.
    ///
    /// A wrapper's text repeats the text of everything inside it, so nested
    /// markup yields concatenated and duplicated fragments.
    AllDescendants,
    /// Only the text nodes that are direct children of each element,
    /// the card anchor included. Each piece of text appears once.
    #[default]
    OwnText,
}

/// Collect the trimmed, non-empty text fragments of a card in document order.
#[must_use]
pub fn collect_fragments(card: ElementRef<'_>, scope: TextScope) -> Vec<String> {
    match scope {
        TextScope::AllDescendants => card
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .map(|el| el.text().collect::<String>())
            .filter_map(non_empty_trimmed)
            .collect(),
        TextScope::OwnText => card
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(own_text)
            .filter_map(non_empty_trimmed)
            .collect(),
    }
}

/// Concatenated direct text children of an element.
#[must_use]
pub fn own_text(el: ElementRef<'_>) -> String {
    el.children()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
        .collect()
}

fn non_empty_trimmed(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Drops fragments that never carry product data.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    words: HashSet<String>,
}

impl NoiseFilter {
    #[must_use]
    pub fn new<S: AsRef<str>>(noise_words: &[S]) -> Self {
        Self {
            words: noise_words
                .iter()
                .map(|w| w.as_ref().trim().to_uppercase())
                .collect(),
        }
    }

    /// Badge words (exact, case-insensitive), anything with a percent sign,
    /// and one- or two-character numbers and letter tokens.
    #[must_use]
    pub fn is_noise(&self, fragment: &str) -> bool {
        self.words.contains(&fragment.to_uppercase())
            || fragment.contains('%')
            || SHORT_NUMBER.is_match(fragment)
            || SHORT_WORD.is_match(fragment)
    }

    #[must_use]
    pub fn retain(&self, fragments: Vec<String>) -> Vec<String> {
        fragments.into_iter().filter(|f| !self.is_noise(f)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::NOISE_WORDS;
    use scraper::{Html, Selector};

    const CARD: &str = r#"
        <a href="/uae-en/now-product/N1/p/">
            <div class="info">
                <span>Kenya</span>
                <div><span>Avocado</span><span>1 pc</span></div>
            </div>
        </a>"#;

    fn with_card<R>(f: impl FnOnce(ElementRef<'_>) -> R) -> R {
        let doc = Html::parse_fragment(CARD);
        let selector = Selector::parse("a").unwrap();
        let card = doc.select(&selector).next().unwrap();
        f(card)
    }

    #[test]
    fn test_own_text_yields_each_leaf_once() {
        let fragments = with_card(|card| collect_fragments(card, TextScope::OwnText));
        assert_eq!(fragments, vec!["Kenya", "Avocado", "1 pc"]);
    }

    #[test]
    fn test_all_descendants_overcounts_wrappers() {
        let fragments = with_card(|card| collect_fragments(card, TextScope::AllDescendants));
        assert_eq!(fragments.len(), 5);
        assert!(fragments[0].contains("Kenya") && fragments[0].contains("Avocado"));
        assert_eq!(fragments[1], "Kenya");
        assert_eq!(fragments[2], "Avocado1 pc");
    }

    #[test]
    fn test_noise_filter_vocabulary() {
        let filter = NoiseFilter::new(&NOISE_WORDS);
        for noise in ["ADD", "add", "Off", "ON", "sale", "NEW", "hot", "20% off", "5", "12", "g", "Kg"] {
            assert!(filter.is_noise(noise), "{noise} should be noise");
        }
        for keep in ["Kenya", "Avocado", "1 pc", "123", "AED 5.00", "Add to cart"] {
            assert!(!filter.is_noise(keep), "{keep} should survive");
        }
    }
}
