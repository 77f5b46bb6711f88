//! URL helpers shared by the extractors and the client.

use url::Url;

/// Check if a URL is an absolute http(s) URL
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Resolve an attribute value against the page it was found on.
///
/// Mirrors what the DOM's `.href`/`.src` properties return: relative values
/// are joined onto `base`, absolute values pass through. Empty, fragment-only
/// and non-http values resolve to `None`.
#[must_use]
pub fn resolve_link(base: &Url, raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('#') {
        return None;
    }

    let resolved = base.join(raw).ok()?;
    matches!(resolved.scheme(), "http" | "https").then_some(resolved)
}

/// Accept an image URL only when it is served from the trusted CDN.
///
/// The check is a substring match on the full URL, so the host may appear
/// anywhere (subdomains, path-style CDN prefixes). Anything else yields an
/// empty string.
#[must_use]
pub fn trusted_image_url(candidate: Option<&str>, trusted_host: &str) -> String {
    match candidate {
        Some(url) if !trusted_host.is_empty() && url.contains(trusted_host) => url.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://minutes.noon.com/uae-en/search/?page=1").unwrap()
    }

    #[test]
    fn test_resolve_relative_link() {
        let url = resolve_link(&base(), "/uae-en/search/?page=2").unwrap();
        assert_eq!(url.as_str(), "https://minutes.noon.com/uae-en/search/?page=2");
    }

    #[test]
    fn test_resolve_rejects_empty_and_fragment() {
        assert!(resolve_link(&base(), "").is_none());
        assert!(resolve_link(&base(), "   ").is_none());
        assert!(resolve_link(&base(), "#top").is_none());
        assert!(resolve_link(&base(), "javascript:void(0)").is_none());
    }

    #[test]
    fn test_trusted_image_url() {
        assert_eq!(
            trusted_image_url(Some("https://f.nooncdn.com/p/x.jpg"), "f.nooncdn.com"),
            "https://f.nooncdn.com/p/x.jpg"
        );
        assert_eq!(
            trusted_image_url(Some("https://evil.example/x.jpg"), "f.nooncdn.com"),
            ""
        );
        assert_eq!(trusted_image_url(None, "f.nooncdn.com"), "");
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://example.com"));
        assert!(!is_valid_url("mailto:a@b.c"));
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("not a url"));
    }
}
