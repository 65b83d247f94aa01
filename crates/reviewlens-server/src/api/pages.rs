//! Server-rendered form and report pages.

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Extension, Form,
};
use reviewlens_core::{QueryError, ReviewQuery};
use reviewlens_report::{
    run_review_report, ReportError, ReviewReport, RATING_CHART_FILE, SENTIMENT_CHART_FILE,
};
use reviewlens_scraper::ScraperError;
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{AppState, CHARTS_ROUTE};

#[derive(Debug, Deserialize)]
pub(super) struct ReviewForm {
    #[serde(default)]
    product_name: String,
    #[serde(default)]
    review_count: String,
}

pub(super) async fn form_page() -> Html<String> {
    Html(render_page(&PageView::empty()))
}

pub(super) async fn submit_form(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Form(form): Form<ReviewForm>,
) -> (StatusCode, Html<String>) {
    let query = match ReviewQuery::parse(&form.product_name, &form.review_count) {
        Ok(query) => query,
        Err(e) => {
            tracing::debug!(error = %e, "rejected review form");
            let view = PageView::with_warning(&form, query_warning(&e));
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(render_page(&view)));
        }
    };

    // Each report gets its own chart directory, whatever id the client sent.
    let run_id = Uuid::new_v4();
    let result = run_review_report(
        &state.scraper,
        state.scorer.as_ref(),
        &state.renderer,
        &query,
        run_id,
    )
    .await;

    match result {
        Ok(report) => {
            prune_chart_runs(&state).await;
            let view = PageView {
                report: Some(&report),
                ..PageView::from_form(&form)
            };
            (StatusCode::OK, Html(render_page(&view)))
        }
        Err(e) => {
            if matches!(e, ReportError::EmptyReviewSet { .. }) {
                tracing::info!(request_id = %req_id.0, %run_id, error = %e, "report not produced");
            } else {
                tracing::warn!(request_id = %req_id.0, %run_id, error = %e, "report failed");
            }
            let view = PageView::with_warning(&form, report_warning(&e));
            (report_status(&e), Html(render_page(&view)))
        }
    }
}

async fn prune_chart_runs(state: &AppState) {
    if state.chart_retention == 0 {
        return;
    }
    let renderer = state.renderer.clone();
    let keep = state.chart_retention;
    match tokio::task::spawn_blocking(move || renderer.prune_runs(keep)).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "failed to prune chart runs"),
        Err(e) => tracing::warn!(error = %e, "chart prune task failed"),
    }
}

pub(super) fn query_warning(err: &QueryError) -> &'static str {
    match err {
        QueryError::EmptyProductName => "⚠ Please enter a product name",
        QueryError::InvalidNumber(_) => "⚠ Please enter a valid number of reviews",
        QueryError::InvalidCount(_) => "⚠ Please enter a multiple of 10 (minimum 10)",
    }
}

pub(super) fn report_warning(err: &ReportError) -> &'static str {
    match err {
        ReportError::Scrape(e) => match e {
            ScraperError::Timeout { .. } => "⚠ The request timed out, please try again",
            ScraperError::Connection { .. } => {
                "⚠ Could not connect to the store, please check your connection"
            }
            ScraperError::Client(_)
            | ScraperError::Request { .. }
            | ScraperError::UnexpectedStatus { .. }
            | ScraperError::InvalidUrl { .. } => "⚠ The request failed, please try again later",
            ScraperError::InvalidCategory { .. } => {
                "⚠ Please enter a product of valid category (Mobiles)"
            }
            ScraperError::NoProductFound => "⚠ No product found",
        },
        ReportError::EmptyReviewSet { .. } => "⚠ No reviews found",
        ReportError::Chart(_) => "⚠ Could not render charts",
    }
}

fn report_status(err: &ReportError) -> StatusCode {
    match err {
        ReportError::Scrape(ScraperError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
        ReportError::Scrape(e) if e.is_network() => StatusCode::BAD_GATEWAY,
        ReportError::Scrape(
            ScraperError::InvalidCategory { .. } | ScraperError::NoProductFound,
        )
        | ReportError::EmptyReviewSet { .. } => StatusCode::OK,
        ReportError::Scrape(_) | ReportError::Chart(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

struct PageView<'a> {
    product_name: &'a str,
    review_count: &'a str,
    warning: Option<&'static str>,
    report: Option<&'a ReviewReport>,
}

impl<'a> PageView<'a> {
    fn empty() -> Self {
        Self {
            product_name: "",
            review_count: "",
            warning: None,
            report: None,
        }
    }

    fn from_form(form: &'a ReviewForm) -> Self {
        Self {
            product_name: &form.product_name,
            review_count: &form.review_count,
            ..Self::empty()
        }
    }

    fn with_warning(form: &'a ReviewForm, warning: &'static str) -> Self {
        Self {
            warning: Some(warning),
            ..Self::from_form(form)
        }
    }
}

fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>ReviewLens</title>
<style>
body { font-family: sans-serif; max-width: 960px; margin: 2rem auto; }
.warning { color: #b71c1c; font-weight: bold; }
.charts img { max-width: 48%; }
table { border-collapse: collapse; width: 100%; }
td, th { border: 1px solid #ddd; padding: 0.4rem; vertical-align: top; }
.Positive { color: #2e7d32; } .Neutral { color: #ef6c00; } .Negative { color: #c62828; }
</style>
</head>
<body>
<h1>ReviewLens</h1>
"#,
    );

    html.push_str(&format!(
        r#"<form method="post" action="/">
<label>Product <input type="text" name="product_name" value="{}"></label>
<label>Reviews <input type="text" name="review_count" value="{}" placeholder="10, 20, 30…"></label>
<button type="submit">Analyse</button>
</form>
"#,
        escape_html(view.product_name),
        escape_html(view.review_count),
    ));

    if let Some(warning) = view.warning {
        html.push_str(&format!(
            "<p class=\"warning\">{}</p>\n",
            escape_html(warning)
        ));
    }

    if let Some(report) = view.report {
        render_report(&mut html, report);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_report(html: &mut String, report: &ReviewReport) {
    let chart_base = format!("{CHARTS_ROUTE}/{}", report.run_id);
    html.push_str(&format!(
        r#"<h2>{title}</h2>
<div class="charts">
<img src="{chart_base}/{RATING_CHART_FILE}" alt="Rating distribution">
<img src="{chart_base}/{SENTIMENT_CHART_FILE}" alt="Sentiment distribution">
</div>
<table>
<thead><tr><th>Name</th><th>Rating</th><th>Heading</th><th>Comment</th><th>Sentiment</th></tr></thead>
<tbody>
"#,
        title = escape_html(&report.title),
    ));

    for review in &report.reviews {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td></tr>\n",
            escape_html(&review.reviewer_name),
            escape_html(&review.rating_text),
            escape_html(&review.heading),
            escape_html(&review.comment),
            review.sentiment.label(),
            review.sentiment,
        ));
    }

    html.push_str("</tbody>\n</table>\n");
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
