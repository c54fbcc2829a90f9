use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::sanitize::sanitize;

/// The spending buckets the passbook tracks. `S1`..`S3` earn score;
/// `Other` only counts toward the monthly total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpendCategory {
    S1,
    S2,
    S3,
    Other,
}

impl SpendCategory {
    /// All categories in display order.
    pub const fn ordered() -> [Self; 4] {
        [Self::S1, Self::S2, Self::S3, Self::Other]
    }

    /// The three categories that contribute to the Green Index.
    pub const fn scored() -> [Self; 3] {
        [Self::S1, Self::S2, Self::S3]
    }

    /// Short code as it appears in CSV files and wire payloads.
    pub const fn code(self) -> &'static str {
        match self {
            Self::S1 => "S1",
            Self::S2 => "S2",
            Self::S3 => "S3",
            Self::Other => "OTHER",
        }
    }

    /// Customer-facing label used in breakdowns and reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::S1 => "S1 日常綠色",
            Self::S2 => "S2 耐用品減碳",
            Self::S3 => "S3 二手循環",
            Self::Other => "其他",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized spend category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for SpendCategory {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "S1" => Ok(Self::S1),
            "S2" => Ok(Self::S2),
            "S3" => Ok(Self::S3),
            "OTHER" => Ok(Self::Other),
            _ => Err(UnknownCategory(raw.trim().to_string())),
        }
    }
}

/// One month of spending as the customer reports it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpendInput {
    pub total: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

impl SpendInput {
    pub fn new(total: f64, s1: f64, s2: f64, s3: f64) -> Self {
        Self { total, s1, s2, s3 }
    }

    /// Copy with every amount clamped to finite, non-negative money.
    pub fn sanitized(self) -> Self {
        Self {
            total: sanitize(self.total),
            s1: sanitize(self.s1),
            s2: sanitize(self.s2),
            s3: sanitize(self.s3),
        }
    }

    /// Sum of the scored categories, excluding `Other`.
    pub fn spent(&self) -> f64 {
        self.s1 + self.s2 + self.s3
    }

    /// Applies per-category deltas, moving the total by the same net amount.
    /// Deltas may be negative; no amount drops below zero.
    pub fn with_deltas(self, d1: f64, d2: f64, d3: f64) -> Self {
        Self {
            total: (self.total + d1 + d2 + d3).max(0.0),
            s1: (self.s1 + d1).max(0.0),
            s2: (self.s2 + d2).max(0.0),
            s3: (self.s3 + d3).max(0.0),
        }
    }

    /// Adds `amount` of spending in `category`, raising the total with it.
    pub(crate) fn bump(mut self, category: SpendCategory, amount: f64) -> Self {
        match category {
            SpendCategory::S1 => self.s1 += amount,
            SpendCategory::S2 => self.s2 += amount,
            SpendCategory::S3 => self.s3 += amount,
            SpendCategory::Other => {}
        }
        self.total += amount;
        self
    }
}

/// Half-away-from-zero rounding to a fixed number of decimal places, the
/// convention used everywhere amounts and scores are surfaced.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
