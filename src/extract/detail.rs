//! Product detail page extraction.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::fields::PriceParser;
use super::fragments::own_text;
use super::schema::ProductDetail;
use crate::config::ScrapeConfig;
use crate::fetcher::RenderedPage;
use crate::scrape::{ScrapeError, ScrapeResult};
use crate::utils::{resolve_link, trusted_image_url};

fn parse_selector(css: &str) -> ScrapeResult<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Config(format!("Invalid selector '{css}': {e:?}")))
}

#[derive(Debug)]
pub struct DetailExtractor {
    heading: Selector,
    meta: Selector,
    image: Selector,
    price: Selector,
    prices: PriceParser,
    trusted_image_host: String,
}

impl DetailExtractor {
    pub fn from_config(config: &ScrapeConfig) -> ScrapeResult<Self> {
        Ok(Self {
            heading: parse_selector("h1")?,
            meta: parse_selector("meta[content]")?,
            image: parse_selector("img[src]")?,
            price: parse_selector(config.detail_price_selector())?,
            prices: PriceParser::new(config.currency()),
            trusted_image_host: config.trusted_image_host().to_string(),
        })
    }

    /// Extract the detail record for `product_id`.
    ///
    /// `image_hint` is the image the caller already has from the listing; it
    /// wins over the page's `og:image` when it is on the trusted CDN.
    pub fn extract(
        &self,
        page: &RenderedPage,
        product_id: &str,
        image_hint: Option<&str>,
    ) -> ScrapeResult<ProductDetail> {
        let document = Html::parse_document(&page.html);

        let name = document
            .select(&self.heading)
            .next()
            .map(|h1| collapse_whitespace(&h1.text().collect::<String>()))
            .filter(|n| !n.is_empty())
            .or_else(|| self.meta_content(&document, "og:title"))
            .ok_or_else(|| ScrapeError::ProductNotFound(product_id.to_string()))?;

        let description = self
            .meta_content(&document, "description")
            .or_else(|| self.meta_content(&document, "og:description"))
            .unwrap_or_default();

        let mut amounts = self.price_amounts(&document).into_iter();
        let price = amounts.next().unwrap_or_default();
        let original_price = amounts.next().unwrap_or_default();

        let og_image = self
            .meta_content(&document, "og:image")
            .and_then(|src| resolve_link(&page.url, &src));
        let hinted = trusted_image_url(image_hint, &self.trusted_image_host);
        let image_url = if hinted.is_empty() {
            trusted_image_url(og_image.as_ref().map(url::Url::as_str), &self.trusted_image_host)
        } else {
            hinted
        };

        let images = self.trusted_images(&document, page);
        debug!(
            "Detail {product_id}: name={name:?}, {} images, price={price:?}",
            images.len()
        );

        Ok(ProductDetail {
            product_id: product_id.to_string(),
            url: page.url.to_string(),
            name,
            description,
            price,
            original_price,
            image_url,
            images,
        })
    }

    /// `content` of the first `<meta>` whose `name` or `property` equals `key`.
    fn meta_content(&self, document: &Html, key: &str) -> Option<String> {
        document
            .select(&self.meta)
            .find(|m| {
                let el = m.value();
                el.attr("name").or_else(|| el.attr("property")) == Some(key)
            })
            .and_then(|m| m.value().attr("content"))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    }

    /// Amounts from price containers in document order.
    ///
    /// Selectors like `[class*='price']` match wrappers and their children
    /// alike, so each element's own text is read at most once.
    fn price_amounts(&self, document: &Html) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut amounts = Vec::new();

        for container in document.select(&self.price) {
            for el in container.descendants().filter_map(ElementRef::wrap) {
                if !visited.insert(el.id()) {
                    continue;
                }
                if let Some(amount) = self.prices.parse(&own_text(el)) {
                    amounts.push(amount);
                }
            }
        }
        amounts
    }

    fn trusted_images(&self, document: &Html, page: &RenderedPage) -> Vec<String> {
        let mut seen = HashSet::new();
        document
            .select(&self.image)
            .filter_map(|img| img.value().attr("src"))
            .filter_map(|src| resolve_link(&page.url, src))
            .map(|url| trusted_image_url(Some(url.as_str()), &self.trusted_image_host))
            .filter(|url| !url.is_empty() && seen.insert(url.clone()))
            .collect()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    const DETAIL: &str = r#"<html><head>
        <meta property="og:title" content="Avocado Kenya">
        <meta name="description" content="Creamy Hass avocados.">
        <meta property="og:image" content="https://f.nooncdn.com/p/og.jpg">
        </head><body>
        <h1>  Avocado
              Kenya </h1>
        <div class="priceBlock">
            <span class="priceNow">AED 5.00</span>
            <span class="priceWas">AED 7.00</span>
        </div>
        <img src="https://f.nooncdn.com/p/a.jpg">
        <img src="https://f.nooncdn.com/p/a.jpg">
        <img src="/static/logo.png">
        <img src="https://f.nooncdn.com/p/b.jpg">
        </body></html>"#;

    fn page(html: &str) -> RenderedPage {
        RenderedPage {
            url: Url::parse("https://minutes.noon.com/uae-en/now-product/N1/").unwrap(),
            html: html.to_string(),
        }
    }

    fn extractor() -> DetailExtractor {
        DetailExtractor::from_config(&ScrapeConfig::default()).unwrap()
    }

    #[test]
    fn test_full_detail_page() {
        let detail = extractor().extract(&page(DETAIL), "N1", None).unwrap();
        assert_eq!(detail.name, "Avocado Kenya");
        assert_eq!(detail.description, "Creamy Hass avocados.");
        assert_eq!(detail.price, "5.00");
        assert_eq!(detail.original_price, "7.00");
        assert_eq!(detail.image_url, "https://f.nooncdn.com/p/og.jpg");
        assert_eq!(
            detail.images,
            vec!["https://f.nooncdn.com/p/a.jpg", "https://f.nooncdn.com/p/b.jpg"]
        );
        assert_eq!(detail.url, "https://minutes.noon.com/uae-en/now-product/N1/");
    }

    #[test]
    fn test_trusted_hint_wins_over_og_image() {
        let detail = extractor()
            .extract(&page(DETAIL), "N1", Some("https://f.nooncdn.com/p/card.jpg"))
            .unwrap();
        assert_eq!(detail.image_url, "https://f.nooncdn.com/p/card.jpg");

        let detail = extractor()
            .extract(&page(DETAIL), "N1", Some("https://evil.example/x.jpg"))
            .unwrap();
        assert_eq!(detail.image_url, "https://f.nooncdn.com/p/og.jpg");
    }

    #[test]
    fn test_name_falls_back_to_og_title() {
        let html = r#"<html><head><meta property="og:title" content="Mango"></head><body></body></html>"#;
        let detail = extractor().extract(&page(html), "N2", None).unwrap();
        assert_eq!(detail.name, "Mango");
        assert_eq!(detail.price, "");
        assert!(detail.images.is_empty());
    }

    #[test]
    fn test_missing_name_is_not_found() {
        let html = "<html><body><h1>   </h1><p>Page not found</p></body></html>";
        let err = extractor().extract(&page(html), "N404", None).unwrap_err();
        assert!(err.is_not_found());
    }
}
