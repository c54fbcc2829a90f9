use std::collections::VecDeque;

use serde::Serialize;

use super::aggregate::MonthlyAggregate;
use crate::scoring::{round_to, TierBand};

/// Months covered by the trailing average.
pub const ROLLING_WINDOW_MONTHS: usize = 12;

/// Trailing mean of monthly GI and the tier that mean would earn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingPoint {
    pub month: String,
    #[serde(rename = "gi12m")]
    pub gi_12m: f64,
    pub band: TierBand,
    #[serde(rename = "level12m")]
    pub level_12m: &'static str,
}

/// Folds the chronological monthly series into its trailing twelve-month
/// view. The window grows until full, then evicts oldest-first.
pub fn rolling_average(series: &[MonthlyAggregate]) -> Vec<RollingPoint> {
    let mut window: VecDeque<f64> = VecDeque::with_capacity(ROLLING_WINDOW_MONTHS + 1);
    let mut sum = 0.0;
    let mut points = Vec::with_capacity(series.len());

    for row in series {
        window.push_back(row.gi);
        sum += row.gi;
        if window.len() > ROLLING_WINDOW_MONTHS {
            if let Some(evicted) = window.pop_front() {
                sum -= evicted;
            }
        }

        let mean = sum / window.len() as f64;
        let band = TierBand::for_gi(mean);
        points.push(RollingPoint {
            month: row.month.clone(),
            gi_12m: round_to(mean, 2),
            band,
            level_12m: band.label(),
        });
    }

    points
}
