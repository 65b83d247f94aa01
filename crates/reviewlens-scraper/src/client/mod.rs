//! HTTP client for the retail site's HTML pages.

mod site;

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ScraperError;

pub use site::SiteUrls;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Fetches HTML pages with a fixed browser-like `User-Agent`.
///
/// Every request carries its own timeout so the fetch chain can give slow
/// steps more time. Failures are never retried; non-2xx responses are
/// returned as [`ScraperError::UnexpectedStatus`].
#[derive(Debug, Clone)]
pub struct ReviewClient {
    client: Client,
}

impl ReviewClient {
    /// Creates a `ReviewClient` sending `user_agent` on every request.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Client`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(ScraperError::Client)?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Timeout`]: no complete response within `timeout`.
    /// - [`ScraperError::Connection`]: the host could not be reached.
    /// - [`ScraperError::Request`]: any other transport or body-decoding failure.
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx status.
    pub async fn fetch_html(&self, url: &Url, timeout: Duration) -> Result<String, ScraperError> {
        tracing::debug!(url = %url, timeout_secs = timeout.as_secs_f32(), "fetching page");

        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| ScraperError::from_reqwest(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ScraperError::from_reqwest(url.as_str(), e))
    }
}
