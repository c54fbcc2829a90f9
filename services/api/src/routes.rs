use crate::infra::{deserialize_amount, AppState};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use greenpass::history::{receipts_router, PassbookHistoryService, ReceiptStore};
use greenpass::scoring::{
    backsolve, compute, sanitize, BacksolvePlan, CategoryCaps, CategoryWeights, ScoreConfig,
    ScoreResult, SpendInput,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Fallback inputs for the export endpoint, the walkthrough month every
/// passbook screen starts from.
const EXPORT_DEFAULTS: (f64, f64, f64, f64) = (5000.0, 1000.0, 2000.0, 500.0);

/// One scoring request as the passbook front end sends it. Amounts may be
/// numbers or numeric strings; the knobs are optional objects.
#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub(crate) total: f64,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub(crate) s1: f64,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub(crate) s2: f64,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub(crate) s3: f64,
    #[serde(default)]
    pub(crate) caps: Option<CategoryCaps>,
    #[serde(default)]
    pub(crate) weights: Option<CategoryWeights>,
}

impl ScoreRequest {
    fn into_parts(self) -> (SpendInput, ScoreConfig) {
        let input = SpendInput::new(self.total, self.s1, self.s2, self.s3);
        let config = ScoreConfig::new(self.caps, self.weights);
        (input, config)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BacksolveRequest {
    #[serde(flatten)]
    pub(crate) score: ScoreRequest,
    pub(crate) target: f64,
}

/// Query half of the export endpoint; absent fields fall back to the
/// walkthrough month.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScoreExportParams {
    total: Option<String>,
    s1: Option<String>,
    s2: Option<String>,
    s3: Option<String>,
}

impl ScoreExportParams {
    fn amount(raw: Option<&str>, fallback: f64) -> f64 {
        match raw {
            Some(text) => sanitize(text.trim().parse::<f64>().unwrap_or(0.0)),
            None => fallback,
        }
    }

    fn into_input(self) -> SpendInput {
        let (total, s1, s2, s3) = EXPORT_DEFAULTS;
        SpendInput::new(
            Self::amount(self.total.as_deref(), total),
            Self::amount(self.s1.as_deref(), s1),
            Self::amount(self.s2.as_deref(), s2),
            Self::amount(self.s3.as_deref(), s3),
        )
    }
}

pub(crate) fn with_passbook_routes<R>(service: Arc<PassbookHistoryService<R>>) -> axum::Router
where
    R: ReceiptStore + 'static,
{
    receipts_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/score", axum::routing::post(score_endpoint))
        .route(
            "/api/v1/score/backsolve",
            axum::routing::post(backsolve_endpoint),
        )
        .route(
            "/api/v1/score/export.csv",
            axum::routing::get(score_export_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_endpoint(Json(payload): Json<ScoreRequest>) -> Json<ScoreResult> {
    let (input, config) = payload.into_parts();
    Json(compute(input, &config))
}

pub(crate) async fn backsolve_endpoint(
    Json(payload): Json<BacksolveRequest>,
) -> Json<BacksolvePlan> {
    let BacksolveRequest { score, target } = payload;
    let (input, config) = score.into_parts();
    Json(backsolve(input, target, &config))
}

pub(crate) async fn score_export_endpoint(
    Query(params): Query<ScoreExportParams>,
) -> impl IntoResponse {
    let input = params.into_input();
    let body = format!(
        "field,value\ntotal,{}\nS1,{}\nS2,{}\nS3,{}\n",
        input.total, input.s1, input.s2, input.s3
    );

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"current_inputs.csv\"",
            ),
        ],
        body,
    )
}
