//! Tests for the type-safe configuration builder pattern

use std::time::Duration;

use catalog_scrape::config::ScrapeConfig;
use catalog_scrape::{FieldStrategy, TextScope};

#[test]
fn test_builder_requires_start_url() {
    // This should not compile if uncommented - no start URL
    // let config = ScrapeConfig::builder().build();

    let config = ScrapeConfig::builder()
        .start_url("https://example.com/listing")
        .build()
        .unwrap();
    assert_eq!(config.start_url(), "https://example.com/listing");
}

#[test]
fn test_builder_optional_fields_have_defaults() {
    let config = ScrapeConfig::builder()
        .start_url("https://example.com")
        .build()
        .unwrap();

    assert_eq!(config.page_delay(), Duration::from_millis(2000));
    assert_eq!(config.max_pages(), None);
    assert!(config.headless());
    assert_eq!(config.currency(), "AED");
    assert_eq!(config.trusted_image_host(), "f.nooncdn.com");
    assert_eq!(config.text_scope(), TextScope::OwnText);
    assert_eq!(config.field_strategy(), FieldStrategy::Labeled);
    assert_eq!(config.page_load_timeout_secs(), 30);
    assert_eq!(config.settle_timeout(), Duration::from_secs(15));
    assert_eq!(config.network_quiet(), Duration::from_millis(500));
    assert_eq!(config.max_concurrent_sessions(), 1);
    assert_eq!(config.noise_words().len(), 6);
}

#[test]
fn test_default_targets_fruits_and_vegetables() {
    let config = ScrapeConfig::default();
    assert_eq!(
        config.start_url(),
        "https://minutes.noon.com/uae-en/search/?f[category]=fruits_vegetables"
    );
    assert_eq!(
        config.detail_url_for("N123"),
        "https://minutes.noon.com/uae-en/now-product/N123/"
    );
}

#[test]
fn test_builder_with_all_optional_fields() {
    let config = ScrapeConfig::builder()
        .start_url("https://shop.example.com/c/fruit")
        .detail_url_template("https://shop.example.com/p/{product_id}")
        .grid_selector("ul.grid a")
        .next_page_selector("a.next:not(.disabled)")
        .detail_price_selector(".amount")
        .product_path_pattern(r"/p/(\w+)")
        .trusted_image_host("img.example.com")
        .currency("USD")
        .noise_words(["BUY", "DEAL"])
        .text_scope(TextScope::AllDescendants)
        .field_strategy(FieldStrategy::Positional)
        .page_delay_ms(0)
        .max_pages(4)
        .page_load_timeout_secs(10)
        .settle_timeout_secs(5)
        .network_quiet_ms(250)
        .max_concurrent_sessions(2)
        .chrome_data_dir("/tmp/profiles")
        .build()
        .unwrap();

    assert_eq!(config.detail_url_for("42"), "https://shop.example.com/p/42");
    assert_eq!(config.grid_selector(), "ul.grid a");
    assert_eq!(config.currency(), "USD");
    assert_eq!(config.noise_words(), ["BUY", "DEAL"]);
    assert_eq!(config.page_delay(), Duration::ZERO);
    assert_eq!(config.max_pages(), Some(4));
    assert_eq!(config.max_concurrent_sessions(), 2);
    assert_eq!(
        config.chrome_data_dir().map(|p| p.to_string_lossy().into_owned()),
        Some("/tmp/profiles".to_string())
    );
}

#[test]
fn test_url_normalization() {
    let config = ScrapeConfig::builder()
        .start_url("minutes.noon.com/uae-en/search/")
        .build()
        .unwrap();
    assert_eq!(config.start_url(), "https://minutes.noon.com/uae-en/search/");
}

#[test]
fn test_validation_rejects_bad_values() {
    let base = || ScrapeConfig::builder().start_url("https://example.com");

    assert!(base().grid_selector("div[").build().is_err());
    assert!(base().next_page_selector("::::").build().is_err());
    assert!(base().product_path_pattern("/now-product/[").build().is_err());
    // Pattern without a capture group cannot yield an id
    assert!(base().product_path_pattern("/now-product/").build().is_err());
    assert!(base().detail_url_template("https://example.com/p/").build().is_err());
    assert!(base().currency("  ").build().is_err());
    assert!(base().max_concurrent_sessions(0).build().is_err());
    assert!(base().max_pages(0).build().is_err());
    assert!(base().network_quiet_ms(0).build().is_err());
}

#[test]
fn test_start_url_must_be_http() {
    let err = ScrapeConfig::builder()
        .start_url("ftp://example.com/listing")
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("http"));

    // Only a bare host gets the https scheme added
    let config = ScrapeConfig::builder()
        .start_url("example.com/listing")
        .build()
        .unwrap();
    assert_eq!(config.start_url(), "https://example.com/listing");
}

#[test]
fn test_deserialized_config_is_validated() {
    let json = serde_json::to_value(ScrapeConfig::default()).unwrap();

    let mut empty_currency = json.clone();
    empty_currency["currency"] = serde_json::json!("");
    let err = serde_json::from_value::<ScrapeConfig>(empty_currency).unwrap_err();
    assert!(err.to_string().contains("currency"));

    let mut no_capture = json.clone();
    no_capture["product_path_pattern"] = serde_json::json!("/now-product/");
    assert!(serde_json::from_value::<ScrapeConfig>(no_capture).is_err());

    let mut ftp = json.clone();
    ftp["start_url"] = serde_json::json!("ftp://example.com/listing");
    assert!(serde_json::from_value::<ScrapeConfig>(ftp).is_err());

    assert!(serde_json::from_value::<ScrapeConfig>(json).is_ok());
}

#[test]
fn test_config_serde_roundtrip_keeps_strategy() {
    let config = ScrapeConfig::builder()
        .start_url("https://example.com")
        .field_strategy(FieldStrategy::Positional)
        .build()
        .unwrap();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""field_strategy":"positional""#));
    let back: ScrapeConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.field_strategy(), FieldStrategy::Positional);
}
