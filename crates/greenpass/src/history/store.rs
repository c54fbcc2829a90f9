use super::record::TransactionRecord;

/// Storage boundary for receipts so the pipeline can be exercised without a
/// filesystem. The engine only ever reads the whole set or appends a batch;
/// retention and locking belong to the implementation.
pub trait ReceiptStore: Send + Sync {
    fn load_all(&self) -> Result<Vec<TransactionRecord>, StoreError>;
    fn append_many(&self, records: &[TransactionRecord]) -> Result<(), StoreError>;
}

/// Error enumeration for receipt store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("receipt store io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("receipt store data malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("receipt store unavailable: {0}")]
    Unavailable(String),
}
