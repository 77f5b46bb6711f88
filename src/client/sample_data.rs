//! Built-in items shown when the API is unavailable.

use super::payload::CatalogItem;

const SAMPLE: &[(&str, &str, &str, &str, &str, &str)] = &[
    // (product_id, origin, name, size, price, original_price)
    ("SAMPLE-AVOCADO", "Kenya", "Avocado", "1 pc", "5.00", "7.00"),
    ("SAMPLE-BANANA", "Philippines", "Banana", "1 kg", "6.25", ""),
    ("SAMPLE-TOMATO", "UAE", "Tomato", "500 g", "3.50", "4.25"),
    ("SAMPLE-MANGO", "India", "Alphonso Mango", "1 kg", "18.95", ""),
    ("SAMPLE-CUCUMBER", "UAE", "Cucumber", "500 g", "2.75", ""),
    ("SAMPLE-ORANGE", "Egypt", "Valencia Orange", "1 kg", "5.95", "6.95"),
    ("SAMPLE-SPINACH", "Jordan", "Baby Spinach", "200 g", "7.50", ""),
    ("SAMPLE-POTATO", "Saudi Arabia", "Potato", "1 kg", "3.25", ""),
];

/// Sample catalog with images left empty, so no CDN is contacted.
#[must_use]
pub fn sample_items() -> Vec<CatalogItem> {
    SAMPLE
        .iter()
        .map(|&(id, origin, name, size, price, original_price)| CatalogItem {
            product_id: Some(id.to_string()),
            origin: origin.to_string(),
            name: name.to_string(),
            size: size.to_string(),
            price: price.to_string(),
            original_price: original_price.to_string(),
            image_url: String::new(),
            page: Some(1),
        })
        .collect()
}
