use std::collections::BTreeMap;

use serde::Serialize;

use super::record::TransactionRecord;
use crate::scoring::{compute, round_to, ScoreConfig, SpendCategory, SpendInput, TierBand};

/// One calendar month of summed receipts with its score snapshot. Months are
/// always scored against the default model, not per-request knobs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAggregate {
    pub month: String,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
    pub other: f64,
    pub total: f64,
    pub gi: f64,
    pub band: TierBand,
    pub level: &'static str,
}

#[derive(Debug, Default, Clone, Copy)]
struct MonthTotals {
    s1: f64,
    s2: f64,
    s3: f64,
    other: f64,
}

/// Buckets records by `YYYY-MM` and scores each month, oldest first.
/// Non-positive amounts are skipped, so hand-edited stores cannot poison a
/// month.
pub fn aggregate_monthly(records: &[TransactionRecord]) -> Vec<MonthlyAggregate> {
    let mut buckets: BTreeMap<String, MonthTotals> = BTreeMap::new();
    for record in records {
        if !(record.amount.is_finite() && record.amount > 0.0) {
            continue;
        }
        let totals = buckets.entry(record.month_key()).or_default();
        match record.category {
            SpendCategory::S1 => totals.s1 += record.amount,
            SpendCategory::S2 => totals.s2 += record.amount,
            SpendCategory::S3 => totals.s3 += record.amount,
            SpendCategory::Other => totals.other += record.amount,
        }
    }

    let config = ScoreConfig::default();
    buckets
        .into_iter()
        .map(|(month, totals)| {
            let total = totals.s1 + totals.s2 + totals.s3 + totals.other;
            let result = compute(
                SpendInput::new(total, totals.s1, totals.s2, totals.s3),
                &config,
            );
            MonthlyAggregate {
                month,
                s1: round_to(totals.s1, 2),
                s2: round_to(totals.s2, 2),
                s3: round_to(totals.s3, 2),
                other: round_to(totals.other, 2),
                total: round_to(total, 2),
                gi: result.gi,
                band: result.band,
                level: result.level,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, category: SpendCategory, amount: f64) -> TransactionRecord {
        TransactionRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid test date"),
            category,
            amount,
        }
    }

    #[test]
    fn buckets_by_month_in_chronological_order() {
        let records = vec![
            record("2025-09-03", SpendCategory::S1, 500.0),
            record("2025-08-01", SpendCategory::S1, 380.0),
            record("2025-08-15", SpendCategory::S2, 2200.0),
            record("2025-08-20", SpendCategory::Other, 600.0),
            record("2025-08-08", SpendCategory::S3, 900.0),
        ];

        let series = aggregate_monthly(&records);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].month, "2025-08");
        assert_eq!(series[1].month, "2025-09");

        let august = &series[0];
        assert_eq!(august.s1, 380.0);
        assert_eq!(august.s2, 2200.0);
        assert_eq!(august.s3, 900.0);
        assert_eq!(august.other, 600.0);
        assert_eq!(august.total, 4080.0);
    }

    #[test]
    fn month_gi_matches_the_documented_august_example() {
        let records = vec![
            record("2025-08-01", SpendCategory::S1, 380.0),
            record("2025-08-08", SpendCategory::S2, 2200.0),
            record("2025-08-15", SpendCategory::S3, 900.0),
            record("2025-08-20", SpendCategory::Other, 600.0),
        ];

        let august = &aggregate_monthly(&records)[0];
        assert_eq!(august.gi, 31.33);
        assert_eq!(august.level, "銀級");
        assert_eq!(august.band, TierBand::Silver);
    }

    #[test]
    fn other_spending_counts_toward_total_but_not_score() {
        let with_other = aggregate_monthly(&[
            record("2025-08-01", SpendCategory::S1, 1000.0),
            record("2025-08-02", SpendCategory::Other, 9000.0),
        ]);
        let without_other =
            aggregate_monthly(&[record("2025-08-01", SpendCategory::S1, 1000.0)]);

        assert_eq!(with_other[0].gi, without_other[0].gi);
        assert_eq!(with_other[0].total, 10000.0);
        assert_eq!(without_other[0].total, 1000.0);
    }

    #[test]
    fn junk_amounts_are_skipped() {
        let series = aggregate_monthly(&[
            record("2025-08-01", SpendCategory::S1, 1000.0),
            record("2025-08-02", SpendCategory::S1, -500.0),
            record("2025-08-03", SpendCategory::S1, f64::NAN),
            record("2025-08-04", SpendCategory::S1, 0.0),
        ]);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].s1, 1000.0);
    }

    #[test]
    fn empty_history_yields_empty_series() {
        assert!(aggregate_monthly(&[]).is_empty());
    }
}
