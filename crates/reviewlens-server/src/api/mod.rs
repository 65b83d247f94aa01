mod pages;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use reviewlens_report::ChartRenderer;
use reviewlens_scraper::ReviewScraper;
use reviewlens_sentiment::PolarityScorer;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

/// URL prefix under which rendered chart files are served.
pub const CHARTS_ROUTE: &str = "/charts";

#[derive(Clone)]
pub struct AppState {
    pub scraper: ReviewScraper,
    pub scorer: Arc<dyn PolarityScorer>,
    pub renderer: ChartRenderer,
    /// Run directories kept after each successful report; `0` disables pruning.
    pub chart_retention: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    fn new(request_id: RequestId) -> Self {
        Self {
            request_id: request_id.0.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    let charts = ServeDir::new(state.renderer.charts_dir());

    Router::new()
        .route("/", get(pages::form_page).post(pages::submit_form))
        .route("/api/v1/health", get(health))
        .nest_service(CHARTS_ROUTE, charts)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData { status: "ok" },
            meta: ResponseMeta::new(req_id),
        }),
    )
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
