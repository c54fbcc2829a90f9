use std::sync::Arc;

use tracing::info;

use super::aggregate::{aggregate_monthly, MonthlyAggregate};
use super::importer::{ImportError, ReceiptCsvImporter};
use super::rolling::{rolling_average, RollingPoint};
use super::store::{ReceiptStore, StoreError};
use crate::scoring::SpendCategory;

/// Service composing the CSV importer, the receipt store, and the two
/// reporting passes over the stored history.
pub struct PassbookHistoryService<R> {
    store: Arc<R>,
}

/// What an import changed plus the refreshed series.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub inserted: usize,
    pub skipped: usize,
    pub monthly: Vec<MonthlyAggregate>,
    pub rolling: Vec<RollingPoint>,
}

/// Stored history with both derived series.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    pub count: usize,
    pub monthly: Vec<MonthlyAggregate>,
    pub rolling: Vec<RollingPoint>,
}

impl<R> PassbookHistoryService<R>
where
    R: ReceiptStore + 'static,
{
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Imports a CSV payload, appends the valid rows, and reports the
    /// refreshed monthly and rolling series.
    pub fn import_csv(&self, bytes: &[u8]) -> Result<ImportReport, HistoryServiceError> {
        let outcome = ReceiptCsvImporter::from_bytes(bytes)?;
        self.store.append_many(&outcome.records)?;

        let records = self.store.load_all()?;
        let monthly = aggregate_monthly(&records);
        let rolling = rolling_average(&monthly);

        info!(
            inserted = outcome.accepted(),
            skipped = outcome.rejected,
            months = monthly.len(),
            "receipt import applied"
        );

        Ok(ImportReport {
            inserted: outcome.accepted(),
            skipped: outcome.rejected,
            monthly,
            rolling,
        })
    }

    /// Current state of the stored history with both derived series.
    pub fn snapshot(&self) -> Result<HistorySnapshot, HistoryServiceError> {
        let records = self.store.load_all()?;
        let monthly = aggregate_monthly(&records);
        let rolling = rolling_average(&monthly);
        Ok(HistorySnapshot {
            count: records.len(),
            monthly,
            rolling,
        })
    }

    /// Stored receipts in the canonical `date,category,amount` CSV shape,
    /// ready to round-trip through [`ReceiptCsvImporter`].
    pub fn export_csv(&self) -> Result<String, HistoryServiceError> {
        let records = self.store.load_all()?;
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(["date", "category", "amount"])
            .map_err(export_failure)?;
        for record in &records {
            writer
                .write_record([
                    record.date.format("%Y-%m-%d").to_string(),
                    record.category.code().to_string(),
                    record.amount.to_string(),
                ])
                .map_err(export_failure)?;
        }

        let bytes = writer.into_inner().map_err(export_failure)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Stored receipts as pretty-printed JSON, the same shape the store
    /// itself persists.
    pub fn export_json(&self) -> Result<String, HistoryServiceError> {
        let records = self.store.load_all()?;
        serde_json::to_string_pretty(&records).map_err(export_failure)
    }

    /// Totals per category across the whole store, mostly for reporting.
    pub fn category_totals(&self) -> Result<Vec<(SpendCategory, f64)>, HistoryServiceError> {
        let records = self.store.load_all()?;
        Ok(SpendCategory::ordered()
            .into_iter()
            .map(|category| {
                let total = records
                    .iter()
                    .filter(|record| record.category == category)
                    .map(|record| record.amount)
                    .sum();
                (category, total)
            })
            .collect())
    }
}

fn export_failure<E: std::fmt::Display>(err: E) -> HistoryServiceError {
    HistoryServiceError::Export(err.to_string())
}

/// Error raised by the history service.
#[derive(Debug, thiserror::Error)]
pub enum HistoryServiceError {
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to serialize history export: {0}")]
    Export(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::testing::MemoryReceiptStore;
    use crate::history::TransactionRecord;

    const SAMPLE: &str = "date,category,amount\n\
2025-08-01,S1,380\n\
2025-08-08,S2,2200\n\
2025-08-15,S3,900\n\
2025-08-20,OTHER,600\n\
bad-date,S1,100\n";

    fn service() -> PassbookHistoryService<MemoryReceiptStore> {
        PassbookHistoryService::new(Arc::new(MemoryReceiptStore::default()))
    }

    #[test]
    fn import_appends_and_reports_fresh_series() {
        let service = service();
        let report = service
            .import_csv(SAMPLE.as_bytes())
            .expect("import succeeds");

        assert_eq!(report.inserted, 4);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.monthly.len(), 1);
        assert_eq!(report.monthly[0].gi, 31.33);
        assert_eq!(report.rolling.len(), 1);
        assert_eq!(report.rolling[0].gi_12m, 31.33);
    }

    #[test]
    fn imports_accumulate_across_calls() {
        let service = service();
        service.import_csv(SAMPLE.as_bytes()).expect("first import");
        let report = service
            .import_csv("date,category,amount\n2025-09-01,S1,500\n".as_bytes())
            .expect("second import");

        assert_eq!(report.inserted, 1);
        assert_eq!(report.monthly.len(), 2);

        let snapshot = service.snapshot().expect("snapshot");
        assert_eq!(snapshot.count, 5);
    }

    #[test]
    fn bad_header_surfaces_as_import_error() {
        let service = service();
        let error = service
            .import_csv(b"when,what,how-much\n2025-08-01,S1,380\n")
            .expect_err("header rejected");

        assert!(matches!(
            error,
            HistoryServiceError::Import(ImportError::MissingColumns)
        ));
    }

    #[test]
    fn csv_export_round_trips_through_the_importer() {
        let service = service();
        service.import_csv(SAMPLE.as_bytes()).expect("import");

        let exported = service.export_csv().expect("export");
        assert!(exported.starts_with("date,category,amount\n"));

        let reimported =
            ReceiptCsvImporter::from_bytes(exported.as_bytes()).expect("reimport succeeds");
        assert_eq!(reimported.accepted(), 4);
        assert_eq!(reimported.rejected, 0);
    }

    #[test]
    fn json_export_matches_store_shape() {
        let service = service();
        service
            .import_csv("date,category,amount\n2025-08-01,S1,380\n".as_bytes())
            .expect("import");

        let exported = service.export_json().expect("export");
        let parsed: Vec<TransactionRecord> =
            serde_json::from_str(&exported).expect("export parses as records");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].amount, 380.0);
    }

    #[test]
    fn category_totals_cover_all_categories() {
        let service = service();
        service.import_csv(SAMPLE.as_bytes()).expect("import");

        let totals = service.category_totals().expect("totals");
        assert_eq!(totals.len(), 4);
        assert_eq!(totals[0], (SpendCategory::S1, 380.0));
        assert_eq!(totals[3], (SpendCategory::Other, 600.0));
    }

    #[test]
    fn empty_store_snapshots_cleanly() {
        let snapshot = service().snapshot().expect("snapshot");
        assert_eq!(snapshot.count, 0);
        assert!(snapshot.monthly.is_empty());
        assert!(snapshot.rolling.is_empty());
    }
}
