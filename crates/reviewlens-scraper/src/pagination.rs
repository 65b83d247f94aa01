//! Review-page pagination state.
//!
//! A [`ReviewPageCursor`] names the page to fetch next and is replaced, never
//! mutated, when a "next page" link is followed. [`ReviewCollector`] enforces
//! the requested review count and [`PageTrail`] stops runaway pagination.

use std::collections::HashSet;

use reqwest::Url;
use reviewlens_core::RawReview;

use crate::client::SiteUrls;
use crate::error::ScraperError;

/// Maximum number of review pages fetched for one scrape.
/// Prevents unbounded loops on pagers that never run out.
pub const MAX_REVIEW_PAGES: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPageCursor {
    pub url: Url,
}

impl ReviewPageCursor {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// The cursor for the page behind `href`, resolved against the site origin.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if `href` cannot be resolved.
    pub fn follow(&self, site: &SiteUrls, href: &str) -> Result<Self, ScraperError> {
        site.resolve(href).map(Self::new)
    }
}

/// Append-only accumulator that never holds more than `limit` reviews.
#[derive(Debug)]
pub struct ReviewCollector {
    limit: usize,
    reviews: Vec<RawReview>,
}

impl ReviewCollector {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            reviews: Vec::new(),
        }
    }

    /// Appends `review` unless the limit is already reached.
    ///
    /// Returns `true` once the collector is full, so callers can stop
    /// mid-page.
    pub fn push(&mut self, review: RawReview) -> bool {
        if !self.is_full() {
            self.reviews.push(review);
        }
        self.is_full()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.reviews.len() >= self.limit
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    #[must_use]
    pub fn into_reviews(self) -> Vec<RawReview> {
        self.reviews
    }
}

/// Pages visited so far in one scrape.
#[derive(Debug, Default)]
pub struct PageTrail {
    visited: HashSet<Url>,
}

impl PageTrail {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit to `url`.
    ///
    /// Returns `false` if the page was already visited or the page budget
    /// ([`MAX_REVIEW_PAGES`]) is spent; the caller should stop paginating.
    pub fn enter(&mut self, url: &Url) -> bool {
        if self.visited.len() >= MAX_REVIEW_PAGES {
            return false;
        }
        self.visited.insert(url.clone())
    }

    #[must_use]
    pub fn pages(&self) -> usize {
        self.visited.len()
    }
}
