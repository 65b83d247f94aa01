//! Command handlers for `scrape` and `classify`.

use std::path::Path;

use reviewlens_core::{AppConfig, ReviewQuery};
use reviewlens_report::{run_review_report, ChartRenderer, ReviewReport};
use reviewlens_scraper::ReviewScraper;
use reviewlens_sentiment::{classify_polarity, LexiconScorer, PolarityScorer};
use uuid::Uuid;

/// Scrape, enrich and chart reviews for one product, then print the report.
///
/// # Errors
///
/// Returns an error if the query is invalid, the scrape fails, no reviews are
/// found, or the charts cannot be written.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    product: &str,
    count: u32,
    charts_dir: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let query = ReviewQuery::new(product, count)?;
    let scraper = ReviewScraper::from_config(config)?;
    let renderer = ChartRenderer::new(charts_dir);
    let run_id = Uuid::new_v4();

    let report = run_review_report(&scraper, &LexiconScorer::new(), &renderer, &query, run_id).await?;

    if config.chart_retention > 0 {
        if let Err(e) = renderer.prune_runs(config.chart_retention) {
            tracing::warn!(error = %e, "failed to prune chart runs");
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}

/// Print the sentiment label and raw polarity for `text`.
pub(crate) fn run_classify(text: &str) {
    let polarity = LexiconScorer::new().polarity(text);
    println!("{}\t{polarity:.3}", classify_polarity(polarity));
}

fn format_report(report: &ReviewReport) -> String {
    let mut out = format!(
        "{} ({} reviews)\n{}\ngenerated {}\n\n",
        report.title,
        report.reviews.len(),
        report.product_url,
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
    );

    out.push_str(&format!(
        "{:<24}{:<8}{:<11}HEADING\n",
        "NAME", "RATING", "SENTIMENT"
    ));
    for review in &report.reviews {
        out.push_str(&format!(
            "{:<24}{:<8}{:<11}{}\n",
            truncate(&review.reviewer_name, 22),
            truncate(&review.rating_text, 6),
            review.sentiment.label(),
            review.heading,
        ));
    }

    let ratings: Vec<String> = report
        .ratings
        .iter()
        .map(|b| format!("{}: {}", b.rating, b.count))
        .collect();
    let sentiments: Vec<String> = report
        .sentiments
        .iter()
        .map(|b| format!("{}: {}", b.sentiment, b.count))
        .collect();
    out.push_str(&format!("\nratings    {}\n", ratings.join(", ")));
    out.push_str(&format!("sentiments {}\n", sentiments.join(", ")));
    out.push_str(&format!(
        "charts     {}\n           {}\n",
        report.charts.rating_chart.display(),
        report.charts.sentiment_chart.display(),
    ));
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}
