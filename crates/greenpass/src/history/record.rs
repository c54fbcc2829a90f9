use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scoring::SpendCategory;

/// One accepted receipt line. Records are append-only once stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub category: SpendCategory,
    pub amount: f64,
}

impl TransactionRecord {
    /// Calendar bucket the record aggregates into, as `YYYY-MM`.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_key_zero_pads() {
        let record = TransactionRecord {
            date: NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid test date"),
            category: SpendCategory::S1,
            amount: 380.0,
        };
        assert_eq!(record.month_key(), "2025-03");
    }

    #[test]
    fn serializes_with_iso_date_and_category_code() {
        let record = TransactionRecord {
            date: NaiveDate::from_ymd_opt(2025, 8, 1).expect("valid test date"),
            category: SpendCategory::Other,
            amount: 600.0,
        };
        let json = serde_json::to_value(&record).expect("record serializes");
        assert_eq!(json["date"], "2025-08-01");
        assert_eq!(json["category"], "OTHER");
        assert_eq!(json["amount"], 600.0);
    }
}
