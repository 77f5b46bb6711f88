//! Field assignment: from filtered card fragments to record fields
//!
//! Cards carry no labels, so fields are recovered heuristically. Two
//! strategies sit behind [`FieldAssigner`]:
//!
//! - [`LabeledAssigner`] gives each fragment a role (price or descriptive)
//!   from its shape, then fills prices from price fragments and
//!   origin/name/size from descriptive ones.
//! - [`PositionalAssigner`] reproduces the storefront's original heuristic:
//!   currency-prefixed fragments are dropped, anything numeric-looking counts
//!   as a price, and the first three survivors are origin/name/size.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::MIN_DESCRIPTIVE_FRAGMENTS;

/// Fields recovered from one card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFields {
    pub origin: String,
    pub name: String,
    pub size: String,
    pub price: String,
    pub original_price: String,
}

/// Turns noise-filtered fragments into fields, or rejects the card.
///
/// Input fragments still include currency-bearing ones; deciding what they
/// mean is the assigner's job. `None` means the card had fewer than
/// [`MIN_DESCRIPTIVE_FRAGMENTS`] usable descriptive fragments.
pub trait FieldAssigner: Send + Sync {
    fn assign(&self, fragments: &[String]) -> Option<CardFields>;
}

/// Selects the [`FieldAssigner`] used by the listing extractor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStrategy {
    #[default]
    Labeled,
    Positional,
}

impl FieldStrategy {
    #[must_use]
    pub fn assigner(self, currency: &str) -> Box<dyn FieldAssigner> {
        match self {
            Self::Labeled => Box::new(LabeledAssigner::new(currency)),
            Self::Positional => Box::new(PositionalAssigner::new(currency)),
        }
    }
}

/// Recognises a price fragment and returns its amount without the currency.
#[derive(Debug, Clone)]
pub struct PriceParser {
    currency: String,
    amount: Regex,
}

impl PriceParser {
    #[must_use]
    pub fn new(currency: &str) -> Self {
        let cur = regex::escape(currency.trim());
        let pattern = format!(r"^(?:{cur}\s*)?(\d+(?:[.,]\d+)*)(?:\s*{cur})?$");
        Self {
            currency: currency.trim().to_string(),
            // Escaped currency keeps the pattern well-formed for any input
            amount: Regex::new(&pattern).expect("PriceParser: escaped currency pattern is valid"),
        }
    }

    /// `"AED 5.00"`, `"5.00 AED"`, `"AED5"` and a bare `"12.50"` parse to
    /// their amount; anything with other words in it does not.
    #[must_use]
    pub fn parse(&self, fragment: &str) -> Option<String> {
        self.amount
            .captures(fragment.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    #[must_use]
    pub fn starts_with_currency(&self, fragment: &str) -> bool {
        fragment.starts_with(&self.currency)
    }

    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }
}

/// Role-based assignment.
#[derive(Debug, Clone)]
pub struct LabeledAssigner {
    prices: PriceParser,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Role {
    Price(String),
    Descriptive,
    /// Currency-led text that is not a clean amount, e.g. two prices run together
    Unusable,
}

impl LabeledAssigner {
    #[must_use]
    pub fn new(currency: &str) -> Self {
        Self {
            prices: PriceParser::new(currency),
        }
    }

    fn role_of(&self, fragment: &str) -> Role {
        if let Some(amount) = self.prices.parse(fragment) {
            Role::Price(amount)
        } else if self.prices.starts_with_currency(fragment) {
            Role::Unusable
        } else {
            Role::Descriptive
        }
    }
}

impl FieldAssigner for LabeledAssigner {
    fn assign(&self, fragments: &[String]) -> Option<CardFields> {
        let mut prices = Vec::new();
        let mut descriptive = Vec::new();

        for fragment in fragments {
            match self.role_of(fragment) {
                Role::Price(amount) => prices.push(amount),
                Role::Descriptive => descriptive.push(fragment.as_str()),
                Role::Unusable => {}
            }
        }

        if descriptive.len() < MIN_DESCRIPTIVE_FRAGMENTS {
            return None;
        }

        let mut prices = prices.into_iter();
        Some(CardFields {
            origin: descriptive[0].to_string(),
            name: descriptive[1].to_string(),
            size: descriptive[2].to_string(),
            price: prices.next().unwrap_or_default(),
            original_price: prices.next().unwrap_or_default(),
        })
    }
}

/// Index-based assignment as the storefront scraper originally did it.
#[derive(Debug, Clone)]
pub struct PositionalAssigner {
    currency: String,
    price_like: Regex,
}

impl PositionalAssigner {
    #[must_use]
    pub fn new(currency: &str) -> Self {
        let cur = regex::escape(currency.trim());
        Self {
            currency: currency.trim().to_string(),
            price_like: Regex::new(&format!(r"{cur}|\d+[.,]?\d*"))
                .expect("PositionalAssigner: escaped currency pattern is valid"),
        }
    }
}

impl FieldAssigner for PositionalAssigner {
    fn assign(&self, fragments: &[String]) -> Option<CardFields> {
        let kept: Vec<&str> = fragments
            .iter()
            .map(String::as_str)
            .filter(|f| !f.starts_with(&self.currency))
            .collect();

        let mut prices = kept
            .iter()
            .filter(|f| self.price_like.is_match(f))
            .map(|f| f.replacen(&self.currency, "", 1).trim().to_string());

        let price = prices.next().unwrap_or_default();
        let original_price = prices.next().unwrap_or_default();

        if kept.len() < MIN_DESCRIPTIVE_FRAGMENTS {
            return None;
        }

        Some(CardFields {
            origin: kept[0].to_string(),
            name: kept[1].to_string(),
            size: kept[2].to_string(),
            price,
            original_price,
        })
    }
}
