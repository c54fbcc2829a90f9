use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::round_to;

/// Thresholds scanned when looking for the next tier, with the 100 roof so
/// the gap is always well defined.
pub const TIER_LADDER: [f64; 7] = [0.0, 10.0, 20.0, 40.0, 60.0, 80.0, 100.0];

/// Benefit bands of the passbook program, lowest first.
///
/// `Basic` and `Bronze` share the 銅級 customer label and carry no cashback;
/// they differ only in the extra rights unlocked at ten points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierBand {
    Basic,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl TierBand {
    /// All bands in ascending threshold order.
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Basic,
            Self::Bronze,
            Self::Silver,
            Self::Gold,
            Self::Platinum,
            Self::Diamond,
        ]
    }

    /// Lowest Green Index that still lands in this band.
    pub const fn threshold(self) -> f64 {
        match self {
            Self::Basic => 0.0,
            Self::Bronze => 10.0,
            Self::Silver => 20.0,
            Self::Gold => 40.0,
            Self::Platinum => 60.0,
            Self::Diamond => 80.0,
        }
    }

    /// Customer-facing tier name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic | Self::Bronze => "銅級",
            Self::Silver => "銀級",
            Self::Gold => "黃金級",
            Self::Platinum => "白金級",
            Self::Diamond => "鑽石級",
        }
    }

    /// Next-month cashback rate, already formatted for display.
    pub const fn cashback(self) -> &'static str {
        match self {
            Self::Basic | Self::Bronze => "0%",
            Self::Silver => "0.1%",
            Self::Gold => "0.2%",
            Self::Platinum => "0.3%",
            Self::Diamond => "0.5%",
        }
    }

    /// Green-loan rate reduction, already formatted for display.
    pub const fn loan_rate_cut(self) -> &'static str {
        match self {
            Self::Basic | Self::Bronze => "0%",
            Self::Silver => "-0.1%",
            Self::Gold => "-0.2%",
            Self::Platinum => "-0.3%",
            Self::Diamond => "-0.5%",
        }
    }

    /// Extra rights unlocked by the band.
    pub const fn extra_rights(self) -> &'static str {
        match self {
            Self::Basic => "基本碳足跡查詢服務",
            Self::Bronze | Self::Silver => "月度碳足跡報告",
            Self::Gold => "綠色商品專屬折扣碼",
            Self::Platinum => "ESG基金手續費5折",
            Self::Diamond => "ESG基金手續費全免、優先審核綠色貸款",
        }
    }

    /// The band a Green Index value falls in.
    pub fn for_gi(gi: f64) -> Self {
        let mut band = Self::Basic;
        for candidate in Self::ordered() {
            if gi >= candidate.threshold() {
                band = candidate;
            }
        }
        band
    }

    /// One-line reward summary shown with every score.
    pub fn reward_text(self) -> String {
        format!(
            "次月現金回饋率 {}，綠色貸款利率減碼 {}",
            self.cashback(),
            self.loan_rate_cut()
        )
    }
}

/// Distance to the next tier threshold. At the top of the ladder the target
/// pins to 100 with a zero gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NextTarget {
    pub target: f64,
    pub delta: f64,
}

/// First ladder rung strictly above `gi`.
pub fn next_target(gi: f64) -> NextTarget {
    for threshold in TIER_LADDER {
        if gi < threshold {
            return NextTarget {
                target: threshold,
                delta: round_to((threshold - gi).max(0.0), 2),
            };
        }
    }
    NextTarget {
        target: 100.0,
        delta: 0.0,
    }
}

/// First and last day of the month after `today`, the window in which a tier
/// earned this month pays out.
pub fn benefit_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = first_of_next_month(today);
    let end = first_of_next_month(start) - Duration::days(1);
    (start, end)
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = match date.month() {
        12 => (date.year() + 1, 1),
        month => (date.year(), month + 1),
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}
