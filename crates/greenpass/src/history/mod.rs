//! Receipt history: CSV import, the append-only store boundary, monthly
//! aggregation, and the trailing twelve-month outlook.

mod aggregate;
mod importer;
mod parser;
mod record;
mod rolling;
pub mod router;
mod service;
mod store;

#[cfg(test)]
mod testing;

pub use aggregate::{aggregate_monthly, MonthlyAggregate};
pub use importer::{ImportError, ImportOutcome, ReceiptCsvImporter};
pub use record::TransactionRecord;
pub use rolling::{rolling_average, RollingPoint, ROLLING_WINDOW_MONTHS};
pub use router::receipts_router;
pub use service::{HistoryServiceError, HistorySnapshot, ImportReport, PassbookHistoryService};
pub use store::{ReceiptStore, StoreError};
