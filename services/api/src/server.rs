use crate::cli::ServeArgs;
use crate::infra::{AppState, JsonFileReceiptStore};
use crate::routes::with_passbook_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use greenpass::config::AppConfig;
use greenpass::error::AppError;
use greenpass::history::PassbookHistoryService;
use greenpass::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(data_dir) = args.data_dir.take() {
        config.storage.data_dir = data_dir;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    std::fs::create_dir_all(&config.storage.data_dir)?;
    let store = Arc::new(JsonFileReceiptStore::new(config.storage.receipts_path()));
    let history = Arc::new(PassbookHistoryService::new(store));

    let app = with_passbook_routes(history)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "green passbook service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
