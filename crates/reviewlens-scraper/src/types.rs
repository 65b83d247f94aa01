//! Values produced by the review scraper.

use std::time::Duration;

use reqwest::Url;
use reviewlens_core::{AppConfig, RawReview};

/// Title used when the product page has no recognisable title element.
pub const FALLBACK_TITLE: &str = "Unknown Product";

/// The product chosen from the search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRef {
    pub title: String,
    pub detail_url: Url,
}

/// Outcome of a completed scrape.
#[derive(Debug, Clone)]
pub struct ScrapedProduct {
    pub product: ProductRef,
    /// `None` when the product page has no review link. `Some` may still be
    /// empty, or shorter than requested, when pagination ran out of pages.
    pub reviews: Option<Vec<RawReview>>,
}

impl ScrapedProduct {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.product.title
    }
}

/// Per-request timeouts for each step of the fetch chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeTimeouts {
    pub search: Duration,
    pub product: Duration,
    /// The first review page tends to be the slowest to render server-side.
    pub first_review_page: Duration,
    pub next_review_page: Duration,
}

impl Default for ScrapeTimeouts {
    fn default() -> Self {
        Self {
            search: Duration::from_secs(15),
            product: Duration::from_secs(15),
            first_review_page: Duration::from_secs(25),
            next_review_page: Duration::from_secs(15),
        }
    }
}

impl ScrapeTimeouts {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            search: config.search_timeout(),
            product: config.product_timeout(),
            first_review_page: config.review_timeout(),
            next_review_page: config.pagination_timeout(),
        }
    }

    /// Applies the same timeout to every step.
    #[must_use]
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            search: timeout,
            product: timeout,
            first_review_page: timeout,
            next_review_page: timeout,
        }
    }
}
