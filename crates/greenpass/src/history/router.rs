use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::aggregate::MonthlyAggregate;
use super::rolling::RollingPoint;
use super::service::{HistoryServiceError, PassbookHistoryService};
use super::store::ReceiptStore;

/// Router builder exposing HTTP endpoints for receipt import and history.
pub fn receipts_router<R>(service: Arc<PassbookHistoryService<R>>) -> Router
where
    R: ReceiptStore + 'static,
{
    Router::new()
        .route("/api/v1/receipts/import", post(import_handler::<R>))
        .route("/api/v1/history", get(history_handler::<R>))
        .route("/api/v1/history/export.csv", get(export_csv_handler::<R>))
        .route("/api/v1/history/export.json", get(export_json_handler::<R>))
        .with_state(service)
}

/// CSV payload wrapped in JSON, the way the passbook front end uploads it.
#[derive(Debug, Deserialize)]
pub(crate) struct ImportRequest {
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImportResponse {
    pub(crate) inserted: usize,
    pub(crate) skipped: usize,
    pub(crate) series: Vec<MonthlyAggregate>,
    pub(crate) rolling: Vec<RollingPoint>,
}

#[derive(Debug, Serialize)]
pub(crate) struct HistoryResponse {
    pub(crate) count: usize,
    pub(crate) series: Vec<MonthlyAggregate>,
    pub(crate) rolling: Vec<RollingPoint>,
}

pub(crate) async fn import_handler<R>(
    State(service): State<Arc<PassbookHistoryService<R>>>,
    axum::Json(request): axum::Json<ImportRequest>,
) -> Response
where
    R: ReceiptStore + 'static,
{
    match service.import_csv(request.csv.as_bytes()) {
        Ok(report) => {
            let payload = ImportResponse {
                inserted: report.inserted,
                skipped: report.skipped,
                series: report.monthly,
                rolling: report.rolling,
            };
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(HistoryServiceError::Import(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<PassbookHistoryService<R>>>,
) -> Response
where
    R: ReceiptStore + 'static,
{
    match service.snapshot() {
        Ok(snapshot) => {
            let payload = HistoryResponse {
                count: snapshot.count,
                series: snapshot.monthly,
                rolling: snapshot.rolling,
            };
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn export_csv_handler<R>(
    State(service): State<Arc<PassbookHistoryService<R>>>,
) -> Response
where
    R: ReceiptStore + 'static,
{
    match service.export_csv() {
        Ok(body) => attachment_response("text/csv; charset=utf-8", "history_receipts.csv", body),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn export_json_handler<R>(
    State(service): State<Arc<PassbookHistoryService<R>>>,
) -> Response
where
    R: ReceiptStore + 'static,
{
    match service.export_json() {
        Ok(body) => {
            attachment_response("application/json; charset=utf-8", "history_receipts.json", body)
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn attachment_response(content_type: &'static str, filename: &'static str, body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}
