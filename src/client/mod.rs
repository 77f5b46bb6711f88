//! Typed consumer of the catalog API
//!
//! [`CatalogClient`] performs the requests; [`CatalogView`] holds what a
//! browsing UI would show, driven through its load state machine.

pub mod payload;
pub mod sample_data;
pub mod state;

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::api::ErrorBody;
use crate::extract::ProductDetail;
use crate::utils::is_valid_url;

pub use payload::{CatalogItem, PayloadError, interpret_body, looks_like_html};
pub use sample_data::sample_items;
pub use state::{Card, CatalogView, LoadState};

/// A listing scrape runs a browser through every page, so requests may take
/// minutes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self, PayloadError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, PayloadError> {
        if !is_valid_url(base_url) {
            return Err(PayloadError::Transport(format!(
                "Base URL '{base_url}' is not an http(s) URL"
            )));
        }
        let mut base_url = Url::parse(base_url)
            .map_err(|e| PayloadError::Transport(format!("Invalid base URL '{base_url}': {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, PayloadError> {
        self.base_url
            .join(path)
            .map_err(|e| PayloadError::Transport(format!("Invalid endpoint '{path}': {e}")))
    }

    /// `GET /api/search`, interpreted leniently.
    pub async fn fetch_items(&self) -> Result<Vec<CatalogItem>, PayloadError> {
        let url = self.endpoint("api/search")?;
        debug!("Fetching catalog from {url}");

        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        interpret_body(status, &body)
    }

    /// `GET /api/product-details/{product_id}`.
    pub async fn fetch_detail(
        &self,
        product_id: &str,
        image_url: Option<&str>,
    ) -> Result<ProductDetail, PayloadError> {
        let mut url = self.endpoint("api/product-details/")?;
        url.path_segments_mut()
            .map_err(|()| PayloadError::Transport(format!("Base URL {} cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .push(product_id);
        if let Some(image_url) = image_url {
            url.query_pairs_mut().append_pair("image_url", image_url);
        }
        debug!("Fetching product detail from {url}");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorBody>(&body) {
                Ok(err) => PayloadError::Api {
                    status: status.as_u16(),
                    message: err.error,
                },
                Err(_) => PayloadError::HttpStatus(status.as_u16()),
            });
        }
        if looks_like_html(&body) {
            return Err(PayloadError::HtmlDocument);
        }
        serde_json::from_str(&body).map_err(|e| PayloadError::InvalidJson(e.to_string()))
    }

    /// Run one full load cycle on `view`.
    pub async fn load(&self, view: &mut CatalogView) {
        view.begin_load();
        let outcome = self.fetch_items().await;
        view.resolve(outcome);
    }
}
