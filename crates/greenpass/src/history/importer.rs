use std::io::Read;
use std::path::Path;

use encoding_rs::BIG5;

use super::parser;
use super::record::TransactionRecord;

/// Failures that abort a whole import. Row-level problems never land here;
/// they only grow the rejected count.
#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumns,
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read receipt export: {}", err),
            ImportError::Csv(err) => write!(f, "invalid receipt CSV data: {}", err),
            ImportError::MissingColumns => {
                write!(f, "receipt CSV must contain the columns date, category, amount")
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::MissingColumns => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Accepted records plus the count of rows dropped by validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    pub records: Vec<TransactionRecord>,
    pub rejected: usize,
}

impl ImportOutcome {
    pub fn accepted(&self) -> usize {
        self.records.len()
    }
}

pub struct ReceiptCsvImporter;

impl ReceiptCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImportOutcome, ImportError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<ImportOutcome, ImportError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<ImportOutcome, ImportError> {
        let text = decode_receipt_text(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let columns = ReceiptColumns::locate(&headers).ok_or(ImportError::MissingColumns)?;

        let mut outcome = ImportOutcome::default();
        for row in reader.records() {
            match row {
                Ok(row) => match columns.validate(&row) {
                    Some(record) => outcome.records.push(record),
                    None => outcome.rejected += 1,
                },
                // A single mangled row (stray quote, broken line) is dropped
                // like any other invalid record instead of failing the batch.
                Err(_) => outcome.rejected += 1,
            }
        }
        Ok(outcome)
    }
}

/// Column positions located by case-insensitive header match, so exports may
/// order and decorate their headers freely.
struct ReceiptColumns {
    date: usize,
    category: usize,
    amount: usize,
}

impl ReceiptColumns {
    fn locate(headers: &csv::StringRecord) -> Option<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
        };
        Some(Self {
            date: find("date")?,
            category: find("category")?,
            amount: find("amount")?,
        })
    }

    fn validate(&self, row: &csv::StringRecord) -> Option<TransactionRecord> {
        let field = |index: usize| row.get(index).unwrap_or("");
        parser::validate_row(field(self.date), field(self.category), field(self.amount))
    }
}

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Receipt exports from local banking apps are usually UTF-8 but Big5 still
/// shows up; decode leniently rather than reject the upload.
fn decode_receipt_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (decoded, _, _) = BIG5.decode(bytes);
            decoded.into_owned()
        }
    }
}
