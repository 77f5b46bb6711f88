//! Record types produced by the extractors.

use serde::{Deserialize, Serialize};
use url::Url;

/// One product as served by `GET /api/search`.
///
/// Field order and names are the wire format; all values are strings except
/// `page`. `origin`/`name`/`size` come from a text heuristic and may be
/// misaligned when a card deviates from the usual layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: String,
    pub origin: String,
    pub name: String,
    pub size: String,
    pub price: String,
    pub original_price: String,
    pub image_url: String,
    /// 1-based listing page on which the product was first seen
    pub page: u32,
}

/// A record as extracted from a single card, before the run knows whether
/// it has seen the id already.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCandidate {
    pub product_id: String,
    pub origin: String,
    pub name: String,
    pub size: String,
    pub price: String,
    pub original_price: String,
    pub image_url: String,
}

impl ProductCandidate {
    #[must_use]
    pub fn into_record(self, page: u32) -> ProductRecord {
        ProductRecord {
            product_id: self.product_id,
            origin: self.origin,
            name: self.name,
            size: self.size,
            price: self.price,
            original_price: self.original_price,
            image_url: self.image_url,
            page,
        }
    }
}

/// Everything one listing page yields.
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Candidates in document order, possibly repeating ids
    pub candidates: Vec<ProductCandidate>,
    /// Resolved target of an enabled next-page control
    pub next_url: Option<Url>,
    /// Anchors that matched the product path but were dropped for lack of text
    pub discarded: usize,
}

/// Detail fields served by `GET /api/product-details/{product_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product_id: String,
    pub url: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub original_price: String,
    pub image_url: String,
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_format() {
        let record = ProductRecord {
            product_id: "N1".into(),
            origin: "Kenya".into(),
            name: "Avocado".into(),
            size: "1 pc".into(),
            price: "5.00".into(),
            original_price: String::new(),
            image_url: String::new(),
            page: 2,
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"product_id":"N1","origin":"Kenya","name":"Avocado","size":"1 pc","price":"5.00","original_price":"","image_url":"","page":2}"#
        );
    }
}
