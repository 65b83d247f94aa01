//! One request's scrape → enrich → chart chain.

use chrono::{DateTime, Utc};
use reviewlens_core::{Review, ReviewQuery};
use reviewlens_scraper::{ReviewScraper, ScraperError};
use reviewlens_sentiment::PolarityScorer;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::builder::{build_report, RatingBucket, SentimentBucket};
use crate::chart::{ChartError, ChartPaths, ChartRenderer};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Scrape(#[from] ScraperError),

    #[error("no reviews found for {title}")]
    EmptyReviewSet { title: String },

    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// A finished report for one product.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewReport {
    pub run_id: Uuid,
    pub title: String,
    pub product_url: String,
    pub reviews: Vec<Review>,
    pub ratings: Vec<RatingBucket>,
    pub sentiments: Vec<SentimentBucket>,
    pub charts: ChartPaths,
    pub generated_at: DateTime<Utc>,
}

/// Scrapes reviews for `query`, enriches them, and renders the run's charts.
///
/// 1. Scrape the product title and up to `query.review_count()` reviews.
/// 2. Fail with [`ReportError::EmptyReviewSet`] when the product has no
///    review link or no review could be parsed.
/// 3. Parse ratings and classify each comment with `scorer`.
/// 4. Render both charts under `run_id` on a blocking thread.
///
/// # Errors
///
/// Returns [`ReportError::Scrape`] for any scraper failure,
/// [`ReportError::EmptyReviewSet`] as described above, and
/// [`ReportError::Chart`] if rendering fails.
pub async fn run_review_report(
    scraper: &ReviewScraper,
    scorer: &dyn PolarityScorer,
    renderer: &ChartRenderer,
    query: &ReviewQuery,
    run_id: Uuid,
) -> Result<ReviewReport, ReportError> {
    let scraped = scraper.scrape(query).await?;
    let title = scraped.product.title;
    let product_url = scraped.product.detail_url.to_string();

    let raw = match scraped.reviews {
        Some(reviews) if !reviews.is_empty() => reviews,
        _ => {
            tracing::info!(title = %title, "no reviews to report");
            return Err(ReportError::EmptyReviewSet { title });
        }
    };

    let built = build_report(scorer, raw);

    let charts = {
        let renderer = renderer.clone();
        let ratings = built.ratings.clone();
        let sentiments = built.sentiments.clone();
        tokio::task::spawn_blocking(move || renderer.render(run_id, &ratings, &sentiments))
            .await
            .map_err(|e| ChartError::Draw(format!("chart task failed: {e}")))??
    };

    tracing::info!(
        run_id = %run_id,
        title = %title,
        reviews = built.reviews.len(),
        "review report ready"
    );

    Ok(ReviewReport {
        run_id,
        title,
        product_url,
        reviews: built.reviews,
        ratings: built.ratings,
        sentiments: built.sentiments,
        charts,
        generated_at: Utc::now(),
    })
}
