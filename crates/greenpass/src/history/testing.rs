//! Shared doubles for exercising the history pipeline without a filesystem.

use std::sync::{Arc, Mutex};

use super::record::TransactionRecord;
use super::store::{ReceiptStore, StoreError};

#[derive(Default, Clone)]
pub(crate) struct MemoryReceiptStore {
    records: Arc<Mutex<Vec<TransactionRecord>>>,
}

impl MemoryReceiptStore {
    pub(crate) fn records(&self) -> Vec<TransactionRecord> {
        self.records.lock().expect("store mutex poisoned").clone()
    }
}

impl ReceiptStore for MemoryReceiptStore {
    fn load_all(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        Ok(self.records())
    }

    fn append_many(&self, records: &[TransactionRecord]) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .extend_from_slice(records);
        Ok(())
    }
}

pub(crate) struct UnavailableReceiptStore;

impl ReceiptStore for UnavailableReceiptStore {
    fn load_all(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        Err(StoreError::Unavailable("volume offline".to_string()))
    }

    fn append_many(&self, _records: &[TransactionRecord]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("volume offline".to_string()))
    }
}
