use chrono::NaiveDate;
use greenpass::history::{ReceiptStore, StoreError, TransactionRecord};
use greenpass::scoring::sanitize;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Receipt ledger persisted as one pretty-printed JSON array. A missing or
/// unreadable file counts as an empty ledger; the next append rewrites it.
#[derive(Debug, Clone)]
pub(crate) struct JsonFileReceiptStore {
    path: PathBuf,
}

impl JsonFileReceiptStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ReceiptStore for JsonFileReceiptStore {
    fn load_all(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Io(err)),
        };

        match serde_json::from_slice(&raw) {
            Ok(records) => Ok(records),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "receipt file unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn append_many(&self, records: &[TransactionRecord]) -> Result<(), StoreError> {
        let mut all = self.load_all()?;
        all.extend_from_slice(records);

        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec_pretty(&all)?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryReceiptStore {
    records: Arc<Mutex<Vec<TransactionRecord>>>,
}

impl ReceiptStore for InMemoryReceiptStore {
    fn load_all(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        let guard = self.records.lock().expect("receipt store mutex poisoned");
        Ok(guard.clone())
    }

    fn append_many(&self, records: &[TransactionRecord]) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("receipt store mutex poisoned");
        guard.extend_from_slice(records);
        Ok(())
    }
}

/// Amounts arrive as numbers or numeric strings depending on the client.
/// Anything unusable scores as zero instead of failing the whole request.
pub(crate) fn coerce_amount(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(number) => sanitize(number.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(text) => sanitize(text.trim().parse::<f64>().unwrap_or(0.0)),
        _ => 0.0,
    }
}

pub(crate) fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_amount(&value))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
