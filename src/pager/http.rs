//! HTTP page source backed by `reqwest`.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};

use super::PageSource;
use crate::config::ClientConfig;
use crate::error::{FetchError, FetchResult};
use crate::items::PageResponse;

/// Fetches pages with `GET {base}?page={n}&per_page={m}`.
pub struct HttpPageSource {
    http_client: Client,
    base_url: Url,
}

impl HttpPageSource {
    /// Build a source from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Config` for invalid settings, or
    /// `FetchError::Request` if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> FetchResult<Self> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Request(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Use a preconfigured client instead of building one.
    pub fn with_client(base_url: Url, http_client: Client) -> Self {
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL for one page. Query parameters already on the base URL are kept,
    /// except any stale `page`/`per_page`.
    pub fn page_url(&self, page: u32, per_page: u32) -> Url {
        let mut url = self.base_url.clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k != "page" && k != "per_page")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());
        url
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, page: u32, per_page: u32) -> FetchResult<PageResponse> {
        let url = self.page_url(page, per_page);

        let response = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(status = %status, page, "Items API returned error");
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<PageResponse>()
            .await
            .map_err(|e| FetchError::Parse(format!("Failed to parse page {page}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> HttpPageSource {
        HttpPageSource::new(&ClientConfig::new().with_base_url(base))
            .expect("source should build")
    }

    #[test]
    fn test_page_url() {
        let src = source("https://api.example.com/items");
        assert_eq!(
            src.page_url(2, 25).as_str(),
            "https://api.example.com/items?page=2&per_page=25"
        );
    }

    #[test]
    fn test_page_url_keeps_other_params() {
        let src = source("https://api.example.com/items?team=core&page=9");
        assert_eq!(
            src.page_url(1, 10).as_str(),
            "https://api.example.com/items?team=core&page=1&per_page=10"
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = HttpPageSource::new(&ClientConfig::new().with_per_page(0));
        assert!(matches!(result, Err(FetchError::Config(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_error() {
        // Port 9 on loopback has nothing listening in the test environment.
        let src = HttpPageSource::with_client(
            Url::parse("http://127.0.0.1:9/items").expect("valid url"),
            Client::builder().no_proxy().build().expect("client"),
        );
        let result = src.fetch_page(1, 10).await;
        assert!(matches!(result, Err(FetchError::Request(_))));
    }
}
