//! Turns scraped reviews into an enriched report with summary charts.
//!
//! [`build_report`] is the pure enrichment step, [`ChartRenderer`] writes
//! the two SVG charts for a run, and [`run_review_report`] chains scraping,
//! enrichment and rendering for one request.

pub mod builder;
pub mod chart;
pub mod pipeline;

pub use builder::{build_report, parse_rating, BuiltReport, RatingBucket, SentimentBucket};
pub use chart::{
    ChartError, ChartPaths, ChartRenderer, RATING_CHART_FILE, SENTIMENT_CHART_FILE,
};
pub use pipeline::{run_review_report, ReportError, ReviewReport};
