//! Timeout wrapper for page operations
//!
//! Chromium can leave a navigation pending indefinitely; every `goto` and
//! load wait goes through [`with_page_timeout`] so a hung page becomes a
//! navigation error instead of a hung request.

use std::future::Future;
use std::time::Duration;

use url::Url;

use crate::scrape::{ScrapeError, ScrapeResult};

/// Run `operation` with an upper bound of `timeout_secs`.
///
/// # Returns
/// * `Ok(T)` - Operation completed in time
/// * `Err` - The operation's own error, or `ScrapeError::Navigation` naming
///   `operation_name` when the timeout elapsed first
pub async fn with_page_timeout<F, T>(
    operation: F,
    timeout_secs: u64,
    url: &Url,
    operation_name: &str,
) -> ScrapeResult<T>
where
    F: Future<Output = ScrapeResult<T>>,
{
    match tokio::time::timeout(Duration::from_secs(timeout_secs), operation).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::Navigation {
            url: url.to_string(),
            message: format!("{operation_name} timeout after {timeout_secs} seconds"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://minutes.noon.com/uae-en/").unwrap()
    }

    #[tokio::test]
    async fn test_timeout_becomes_navigation_error() {
        let result: ScrapeResult<()> = with_page_timeout(
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            },
            1,
            &url(),
            "Page navigation",
        )
        .await;

        match result {
            Err(ScrapeError::Navigation { message, .. }) => {
                assert_eq!(message, "Page navigation timeout after 1 seconds");
            }
            other => panic!("expected navigation timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: ScrapeResult<()> = with_page_timeout(
            async { Err(ScrapeError::Evaluation("boom".into())) },
            5,
            &url(),
            "Page load",
        )
        .await;
        assert!(matches!(result, Err(ScrapeError::Evaluation(_))));
    }
}
