//! The search → product → reviews fetch chain.

use reqwest::Url;
use reviewlens_core::{AppConfig, RawReview, ReviewQuery};

use crate::client::{ReviewClient, SiteUrls};
use crate::error::ScraperError;
use crate::markup::{self, ReviewLink};
use crate::pagination::{PageTrail, ReviewCollector, ReviewPageCursor};
use crate::types::{ProductRef, ScrapeTimeouts, ScrapedProduct, FALLBACK_TITLE};

/// Scrapes the first matching product and up to `review_count` of its reviews.
///
/// Requests are issued one at a time and never retried; the first failed
/// request aborts the scrape.
#[derive(Debug, Clone)]
pub struct ReviewScraper {
    client: ReviewClient,
    site: SiteUrls,
    timeouts: ScrapeTimeouts,
}

impl ReviewScraper {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] for a bad `base_url` and
    /// [`ScraperError::Client`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeouts: ScrapeTimeouts,
    ) -> Result<Self, ScraperError> {
        Ok(Self {
            client: ReviewClient::new(user_agent)?,
            site: SiteUrls::new(base_url)?,
            timeouts,
        })
    }

    /// # Errors
    ///
    /// Same as [`ReviewScraper::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.site_base_url,
            &config.user_agent,
            ScrapeTimeouts::from_config(config),
        )
    }

    /// Runs the full fetch chain for `query`.
    ///
    /// A product page without a review link is a soft outcome: the title is
    /// returned with `reviews: None`. Running out of review pages before
    /// `review_count` is reached returns the partial set.
    ///
    /// # Errors
    ///
    /// - Network failures on any request: [`ScraperError::Timeout`],
    ///   [`ScraperError::Connection`], [`ScraperError::Request`],
    ///   [`ScraperError::UnexpectedStatus`].
    /// - [`ScraperError::InvalidCategory`]: the search page is not a
    ///   Mobiles listing; no further requests are made.
    /// - [`ScraperError::NoProductFound`]: no result card is a product.
    /// - [`ScraperError::InvalidUrl`]: a scraped link could not be resolved.
    pub async fn scrape(&self, query: &ReviewQuery) -> Result<ScrapedProduct, ScraperError> {
        tracing::info!(
            query = query.product_name(),
            review_count = query.review_count(),
            "starting review scrape"
        );

        let detail_url = self.find_product(query.product_name()).await?;

        let body = self
            .client
            .fetch_html(&detail_url, self.timeouts.product)
            .await?;
        let page = markup::parse_product_page(&body);

        let title = page.title.unwrap_or_else(|| {
            tracing::warn!(url = %detail_url, "product title not found; using fallback");
            FALLBACK_TITLE.to_owned()
        });
        let product = ProductRef { title, detail_url };

        let review_href = match page.review_link {
            ReviewLink::Found(href) => href,
            ReviewLink::MissingContainer => {
                tracing::info!(title = %product.title, "review container not found");
                return Ok(ScrapedProduct {
                    product,
                    reviews: None,
                });
            }
            ReviewLink::MissingAnchor => {
                tracing::info!(title = %product.title, "review link not found in review container");
                return Ok(ScrapedProduct {
                    product,
                    reviews: None,
                });
            }
        };

        let first_page = ReviewPageCursor::new(self.site.resolve(&review_href)?);
        let reviews = self
            .collect_reviews(first_page, query.review_limit())
            .await?;

        tracing::info!(
            title = %product.title,
            collected = reviews.len(),
            requested = query.review_count(),
            "review scrape finished"
        );

        Ok(ScrapedProduct {
            product,
            reviews: Some(reviews),
        })
    }

    /// Searches for `product_name` and returns the first valid product's URL.
    async fn find_product(&self, product_name: &str) -> Result<Url, ScraperError> {
        let search_url = self.site.search_url(product_name);
        let body = self
            .client
            .fetch_html(&search_url, self.timeouts.search)
            .await?;
        let results = markup::parse_search_results(&body);

        if !results.in_required_category() {
            tracing::info!(
                category = ?results.category_label,
                "search results outside required category"
            );
            return Err(ScraperError::InvalidCategory {
                found: results.category_label,
            });
        }

        let mut products = results.entries.into_iter().filter(|entry| {
            if !entry.is_product {
                tracing::debug!(href = ?entry.href, "skipping result entry without product card");
            }
            entry.is_product
        });

        let first = products.next().ok_or(ScraperError::NoProductFound)?;
        let href = first.href.ok_or(ScraperError::NoProductFound)?;
        self.site.resolve(&href)
    }

    /// Walks review pages from `cursor` until `limit` reviews are collected
    /// or the pager runs out.
    async fn collect_reviews(
        &self,
        mut cursor: ReviewPageCursor,
        limit: usize,
    ) -> Result<Vec<RawReview>, ScraperError> {
        let mut collector = ReviewCollector::new(limit);
        let mut trail = PageTrail::new();
        let mut timeout = self.timeouts.first_review_page;

        loop {
            if !trail.enter(&cursor.url) {
                tracing::warn!(
                    url = %cursor.url,
                    pages = trail.pages(),
                    "review pagination revisited a page or hit the page limit; stopping"
                );
                break;
            }

            let body = self.client.fetch_html(&cursor.url, timeout).await?;
            timeout = self.timeouts.next_review_page;
            let page = markup::parse_review_page(&body);

            for (index, block) in page.blocks.into_iter().enumerate() {
                match block {
                    Ok(review) => {
                        if collector.push(review) {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(
                            url = %cursor.url,
                            block = index,
                            error = %e,
                            "skipping unparseable review block"
                        );
                    }
                }
            }

            if collector.is_full() {
                break;
            }

            let Some(href) = page.next_href else {
                tracing::debug!(
                    url = %cursor.url,
                    collected = collector.len(),
                    "no next review page"
                );
                break;
            };

            cursor = match cursor.follow(&self.site, &href) {
                Ok(next) => next,
                Err(e) => {
                    tracing::warn!(href = %href, error = %e, "unresolvable next-page link; stopping");
                    break;
                }
            };
        }

        Ok(collector.into_reviews())
    }
}
