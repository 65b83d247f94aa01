//! Review scraper for a single retail site.
//!
//! [`ReviewScraper::scrape`] runs the search → product page → review pages
//! chain and returns the product title with the collected reviews. All
//! site-specific selectors live in [`markup`].

pub mod client;
pub mod error;
pub mod markup;
pub mod pagination;
pub mod scrape;
pub mod types;

pub use client::{ReviewClient, SiteUrls};
pub use error::ScraperError;
pub use scrape::ReviewScraper;
pub use types::{ProductRef, ScrapeTimeouts, ScrapedProduct, FALLBACK_TITLE};
