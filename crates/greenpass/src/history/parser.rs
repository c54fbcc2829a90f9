use chrono::NaiveDate;

use super::record::TransactionRecord;
use crate::scoring::{round_to, SpendCategory};

/// Date spellings seen in receipt exports, tried in order.
pub(crate) const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"];

pub(crate) fn parse_receipt_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Amounts must be strictly positive, finite currency.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Assembles a record from raw CSV fields, or nothing if any field fails
/// validation. Amounts land in the store rounded to cents.
pub(crate) fn validate_row(date: &str, category: &str, amount: &str) -> Option<TransactionRecord> {
    let date = parse_receipt_date(date)?;
    let category = category.parse::<SpendCategory>().ok()?;
    let amount = parse_amount(amount)?;
    Some(TransactionRecord {
        date,
        category,
        amount: round_to(amount, 2),
    })
}
