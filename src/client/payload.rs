//! Interpretation of `/api/search` response bodies.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Why a response could not be turned into items.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("API request failed: {0}")]
    Transport(String),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    /// A non-success response carrying the server's `{"error"}` message
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The server answered with a web page, typically a dev-server or proxy
    /// error page, instead of JSON.
    #[error("API returned an HTML document instead of JSON")]
    HtmlDocument,

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("Ambiguous response: object has array fields {0:?}")]
    Ambiguous(Vec<String>),

    #[error("No valid items found in API response")]
    NoItems,
}

impl From<reqwest::Error> for PayloadError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// One catalog entry as the consumer sees it.
///
/// Every field is optional and accepts any JSON scalar, so that a malformed
/// entry still renders instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogItem {
    #[serde(deserialize_with = "lenient_id")]
    pub product_id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub origin: String,
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub size: String,
    #[serde(deserialize_with = "lenient_text")]
    pub price: String,
    #[serde(deserialize_with = "lenient_text")]
    pub original_price: String,
    #[serde(deserialize_with = "lenient_text")]
    pub image_url: String,
    #[serde(deserialize_with = "lenient_page")]
    pub page: Option<u32>,
}

/// Strings as they are, numbers and booleans in their JSON spelling.
/// Null, arrays and objects have no text.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_page<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let page = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(page.and_then(|p| u32::try_from(p).ok()))
}

impl CatalogItem {
    /// The name, or the origin when the name is empty.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.origin
        } else {
            &self.name
        }
    }

    /// Whether the item has an id its detail page can be opened with.
    #[must_use]
    pub fn is_viewable(&self) -> bool {
        self.product_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }
}

/// Case-insensitive check for an HTML document after trimming.
#[must_use]
pub fn looks_like_html(body: &str) -> bool {
    let head: String = body.trim_start().chars().take(16).collect();
    let head = head.to_ascii_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}

/// Pull the item list out of a parsed JSON value.
pub fn items_from_value(value: Value) -> Result<Vec<CatalogItem>, PayloadError> {
    let raw_items = match value {
        Value::Array(items) => items,
        Value::Object(map) => {
            let mut array_fields: Vec<String> = map
                .iter()
                .filter(|(_, v)| v.is_array())
                .map(|(k, _)| k.clone())
                .collect();

            match array_fields.len() {
                0 => vec![Value::Object(map)],
                1 => map
                    .into_iter()
                    .find_map(|(_, v)| match v {
                        Value::Array(items) => Some(items),
                        _ => None,
                    })
                    .unwrap_or_default(),
                _ => {
                    array_fields.sort();
                    return Err(PayloadError::Ambiguous(array_fields));
                }
            }
        }
        _ => Vec::new(),
    };

    let items = raw_items
        .into_iter()
        .map(serde_json::from_value::<CatalogItem>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PayloadError::InvalidJson(e.to_string()))?;

    if items.is_empty() {
        Err(PayloadError::NoItems)
    } else {
        Ok(items)
    }
}

/// Interpret a complete `/api/search` response.
pub fn interpret_body(status: u16, body: &str) -> Result<Vec<CatalogItem>, PayloadError> {
    if !(200..300).contains(&status) {
        return Err(PayloadError::HttpStatus(status));
    }
    if looks_like_html(body) {
        return Err(PayloadError::HtmlDocument);
    }
    let value: Value =
        serde_json::from_str(body).map_err(|e| PayloadError::InvalidJson(e.to_string()))?;
    items_from_value(value)
}
