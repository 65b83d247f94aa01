use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Request};
use reviewlens_scraper::ScrapeTimeouts;
use reviewlens_sentiment::LexiconScorer;
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

const PRODUCT_PATH: &str = "/apple-iphone-15/p/itm1";
const REVIEWS_PATH: &str = "/apple-iphone-15/product-reviews/itm1";

fn test_state(base_url: &str, charts_dir: &std::path::Path) -> AppState {
    AppState {
        scraper: ReviewScraper::new(
            base_url,
            "reviewlens-test/0.1",
            ScrapeTimeouts::uniform(Duration::from_secs(5)),
        )
        .expect("scraper"),
        scorer: Arc::new(LexiconScorer::new()),
        renderer: ChartRenderer::new(charts_dir),
        chart_retention: 4,
    }
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(format!("<html><body>{body}</body></html>"))
}

async fn mount_store(server: &MockServer, category: &str) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html(&format!(
            r#"<a class="GD4sye ECYCDD">{category}</a>
               <div class="cPHDOP col-12-12"><div><div><div><a href="{PRODUCT_PATH}?pid=MOB1"><div class="KzDlHZ">card</div></a></div></div></div></div>"#
        )))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_PATH))
        .respond_with(html(&format!(
            r#"<span class="VU-ZEz">iPhone 15</span>
               <div class="col pPAw9M"><a href="{REVIEWS_PATH}?pid=MOB1&amp;marketplace=FLIPKART">All reviews</a></div>"#
        )))
        .mount(server)
        .await;

    let blocks: String = (0..10)
        .map(|i| {
            format!(
                r#"<div class="EKFha-"><div><div>
                    <div class="row"><div>{rating}</div><p>Heading {i}</p></div>
                    <div class="row"><div><div><div>Great phone &lt;3</div></div></div></div>
                    <div class="row"><p class="_2NsDsF AwS1CA">Buyer {i}</p></div>
                </div></div></div>"#,
                rating = 3 + i % 3
            )
        })
        .collect();
    Mock::given(method("GET"))
        .and(path(REVIEWS_PATH))
        .respond_with(html(&blocks))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Health and form page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok_with_request_id() {
    let charts = tempfile::tempdir().expect("tempdir");
    let app = build_app(test_state("http://127.0.0.1:1", charts.path()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value =
        serde_json::from_str(&body_text(response).await).expect("json parse");
    assert_eq!(json["data"]["status"], "ok");
    let request_id = json["meta"]["request_id"].as_str().expect("request_id");
    assert!(Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn form_page_renders_inputs() {
    let charts = tempfile::tempdir().expect("tempdir");
    let app = build_app(test_state("http://127.0.0.1:1", charts.path()));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(r#"name="product_name""#));
    assert!(body.contains(r#"name="review_count""#));
    assert!(!body.contains("class=\"warning\""));
}

// ---------------------------------------------------------------------------
// Form validation never reaches the store
// ---------------------------------------------------------------------------

async fn assert_rejected_without_fetch(form: &str, message: &str) {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let charts = tempfile::tempdir().expect("tempdir");
    let app = build_app(test_state(&server.uri(), charts.path()));

    let response = app.oneshot(form_request(form)).await.expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains(message), "missing {message:?} in {body}");
}

#[tokio::test]
async fn count_not_multiple_of_ten_is_rejected() {
    assert_rejected_without_fetch(
        "product_name=iphone+15&review_count=15",
        "⚠ Please enter a multiple of 10 (minimum 10)",
    )
    .await;
}

#[tokio::test]
async fn count_below_minimum_is_rejected() {
    assert_rejected_without_fetch(
        "product_name=iphone+15&review_count=0",
        "⚠ Please enter a multiple of 10 (minimum 10)",
    )
    .await;
}

#[tokio::test]
async fn non_numeric_count_is_rejected() {
    assert_rejected_without_fetch(
        "product_name=iphone+15&review_count=twenty",
        "⚠ Please enter a valid number of reviews",
    )
    .await;
}

#[tokio::test]
async fn blank_product_name_is_rejected() {
    assert_rejected_without_fetch(
        "product_name=+++&review_count=20",
        "⚠ Please enter a product name",
    )
    .await;
}

#[tokio::test]
async fn missing_fields_are_treated_as_blank() {
    assert_rejected_without_fetch("", "⚠ Please enter a product name").await;
}

// ---------------------------------------------------------------------------
// Full report
// ---------------------------------------------------------------------------

/// Pulls the chart run id out of the first `/charts/{uuid}/` link in a page.
fn chart_run_id(body: &str) -> Uuid {
    let start = body.find("/charts/").expect("chart link") + "/charts/".len();
    let id = body.get(start..start + 36).expect("run id");
    Uuid::parse_str(id).expect("uuid run id")
}

fn post_with_request_id(request_id: Uuid) -> Request<Body> {
    let mut request = form_request("product_name=iphone+15&review_count=10");
    request.headers_mut().insert(
        REQUEST_ID_HEADER,
        request_id.to_string().parse().expect("header value"),
    );
    request
}

#[tokio::test]
async fn valid_form_renders_report_and_serves_charts() {
    let server = MockServer::start().await;
    mount_store(&server, "Mobiles").await;
    let charts = tempfile::tempdir().expect("tempdir");
    let state = test_state(&server.uri(), charts.path());
    let request_id = Uuid::new_v4();

    let response = build_app(state.clone())
        .oneshot(post_with_request_id(request_id))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some(request_id.to_string().as_str())
    );
    let body = body_text(response).await;
    assert!(body.contains("<h2>iPhone 15</h2>"));
    assert_eq!(body.matches("<tr><td>Buyer ").count(), 10);
    assert!(body.contains("Great phone &lt;3"));
    assert!(body.contains(r#"class="Positive""#));
    let run_id = chart_run_id(&body);
    assert_ne!(run_id, request_id);
    let rating_src = format!("/charts/{run_id}/rating_chart.svg");
    assert!(body.contains(&rating_src));
    assert!(body.contains(&format!("/charts/{run_id}/sentiment_chart.svg")));

    let chart = build_app(state)
        .oneshot(
            Request::builder()
                .uri(&rating_src)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(chart.status(), StatusCode::OK);
    assert!(body_text(chart).await.contains("<svg"));
}

#[tokio::test]
async fn repeated_request_id_gets_separate_chart_runs() {
    let server = MockServer::start().await;
    mount_store(&server, "Mobiles").await;
    let charts = tempfile::tempdir().expect("tempdir");
    let state = test_state(&server.uri(), charts.path());
    let request_id = Uuid::new_v4();

    let mut run_ids = Vec::new();
    for _ in 0..2 {
        let response = build_app(state.clone())
            .oneshot(post_with_request_id(request_id))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        run_ids.push(chart_run_id(&body_text(response).await));
    }

    assert_ne!(run_ids[0], run_ids[1]);
    let run_dirs = std::fs::read_dir(charts.path())
        .expect("charts dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .count();
    assert_eq!(run_dirs, 2);
    for run_id in &run_ids {
        assert!(charts
            .path()
            .join(run_id.to_string())
            .join("rating_chart.svg")
            .is_file());
    }
}

#[tokio::test]
async fn wrong_category_renders_category_warning() {
    let server = MockServer::start().await;
    mount_store(&server, "Laptops").await;
    let charts = tempfile::tempdir().expect("tempdir");
    let app = build_app(test_state(&server.uri(), charts.path()));

    let response = app
        .oneshot(form_request("product_name=macbook&review_count=10"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("⚠ Please enter a product of valid category (Mobiles)"));
    assert!(body.contains(r#"value="macbook""#));
}

#[tokio::test]
async fn unreachable_store_renders_connection_warning() {
    let charts = tempfile::tempdir().expect("tempdir");
    let app = build_app(test_state("http://127.0.0.1:1", charts.path()));

    let response = app
        .oneshot(form_request("product_name=iphone&review_count=10"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_text(response).await;
    assert!(body.contains("⚠ Could not connect to the store, please check your connection"));
}
