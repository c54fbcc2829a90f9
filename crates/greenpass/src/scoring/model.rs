use serde::{Deserialize, Serialize};

use super::config::{CategoryCaps, CategoryWeights, ScoreConfig};
use super::domain::{round_to, SpendCategory, SpendInput};
use super::tiers::{next_target, NextTarget, TierBand};

/// Spend, in currency, that lifts a raw category score from 0 to 100 before
/// the cap bites.
pub(crate) const SCALE_S1: f64 = 4000.0;
pub(crate) const SCALE_S2: f64 = 7000.0;
pub(crate) const SCALE_S3: f64 = 8000.0;

/// A value per scored category, serialized under the S1/S2/S3 wire keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    #[serde(rename = "S1")]
    pub s1: f64,
    #[serde(rename = "S2")]
    pub s2: f64,
    #[serde(rename = "S3")]
    pub s3: f64,
}

impl CategoryScores {
    fn rounded(self, places: i32) -> Self {
        Self {
            s1: round_to(self.s1, places),
            s2: round_to(self.s2, places),
            s3: round_to(self.s3, places),
        }
    }
}

/// Currency needed per category to close the gap to the next tier.
/// `None` means the category is capped out and more spend buys nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategorySuggestions {
    #[serde(rename = "S1")]
    pub s1: Option<f64>,
    #[serde(rename = "S2")]
    pub s2: Option<f64>,
    #[serde(rename = "S3")]
    pub s3: Option<f64>,
}

/// One slice of the spending breakdown shown under the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: SpendCategory,
    pub label: &'static str,
    pub amount: f64,
    pub percent: f64,
}

/// Everything one scoring pass produces. Serialized field names follow the
/// passbook wire format, so `scores` goes out as `s_scores` and so on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Inputs as actually scored: sanitized, with the total corrected upward
    /// when the category sum exceeded it.
    pub inputs: SpendInput,
    /// True when the reported total was overridden by the category sum.
    pub total_adjusted: bool,
    pub spent: f64,
    pub other: f64,
    pub breakdown: Vec<CategoryShare>,
    #[serde(rename = "s_scores")]
    pub scores: CategoryScores,
    #[serde(rename = "s_norms")]
    pub norms: CategoryScores,
    pub gi: f64,
    pub band: TierBand,
    pub level: &'static str,
    pub reward: String,
    pub extra_rights: &'static str,
    pub next_target: NextTarget,
    pub suggestions: CategorySuggestions,
    pub caps: CategoryCaps,
    pub weights: CategoryWeights,
}

/// Scores one month of spending against the configured model.
///
/// Total function: any combination of inputs and knobs produces a result,
/// never an error. Garbage amounts are sanitized to zero on the way in.
pub fn compute(input: SpendInput, config: &ScoreConfig) -> ScoreResult {
    let config = config.sanitized();
    let caps = config.caps;
    let weights = config.normalized_weights();

    let SpendInput { total, s1, s2, s3 } = input.sanitized();
    let spent = s1 + s2 + s3;
    // Category sums win over a stale or understated total.
    let total_adjusted = spent > total;
    let total = if total_adjusted { spent } else { total };
    let other = (total - spent).max(0.0);
    let denom = if total > 0.0 {
        total
    } else if spent > 0.0 {
        spent
    } else {
        1.0
    };

    let raw = CategoryScores {
        s1: (100.0 * s1 / SCALE_S1).min(caps.s1),
        s2: (100.0 * s2 / SCALE_S2).min(caps.s2),
        s3: (100.0 * s3 / SCALE_S3).min(caps.s3),
    };
    let norms = CategoryScores {
        s1: norm_against_cap(raw.s1, caps.s1),
        s2: norm_against_cap(raw.s2, caps.s2),
        s3: norm_against_cap(raw.s3, caps.s3),
    };

    let gi = (weights.s1 * norms.s1 + weights.s2 * norms.s2 + weights.s3 * norms.s3)
        .clamp(0.0, 100.0);

    // Tier, gap, and suggestions all read the exact index; rounding is
    // presentation only and happens last.
    let band = TierBand::for_gi(gi);
    let target = next_target(gi);
    let suggestions = CategorySuggestions {
        s1: suggest(target.delta, slope(weights.s1, caps.s1, SCALE_S1, raw.s1)),
        s2: suggest(target.delta, slope(weights.s2, caps.s2, SCALE_S2, raw.s2)),
        s3: suggest(target.delta, slope(weights.s3, caps.s3, SCALE_S3, raw.s3)),
    };

    let corrected = SpendInput { total, s1, s2, s3 };

    ScoreResult {
        inputs: corrected,
        total_adjusted,
        spent: round_to(spent, 2),
        other: round_to(other, 2),
        breakdown: breakdown_shares(&corrected, other, denom),
        scores: raw.rounded(2),
        norms: norms.rounded(2),
        gi: round_to(gi, 2),
        band,
        level: band.label(),
        reward: band.reward_text(),
        extra_rights: band.extra_rights(),
        next_target: target,
        suggestions,
        caps,
        weights: CategoryWeights {
            s1: round_to(weights.s1, 4),
            s2: round_to(weights.s2, 4),
            s3: round_to(weights.s3, 4),
        },
    }
}

fn norm_against_cap(raw: f64, cap: f64) -> f64 {
    if cap > 0.0 {
        raw / cap * 100.0
    } else {
        0.0
    }
}

/// Marginal GI per unit of currency while the category is below its cap.
/// A capped category has zero slope, so spending more there is pointless.
fn slope(weight: f64, cap: f64, scale: f64, raw: f64) -> f64 {
    if raw < cap {
        weight * (100.0 / cap) * (100.0 / scale)
    } else {
        0.0
    }
}

fn suggest(delta: f64, slope: f64) -> Option<f64> {
    if slope > 0.0 {
        Some(round_to((delta / slope).max(0.0), 0))
    } else {
        None
    }
}

fn breakdown_shares(input: &SpendInput, other: f64, denom: f64) -> Vec<CategoryShare> {
    let amounts = [
        (SpendCategory::S1, input.s1),
        (SpendCategory::S2, input.s2),
        (SpendCategory::S3, input.s3),
        (SpendCategory::Other, other),
    ];
    amounts
        .into_iter()
        .map(|(category, amount)| {
            let amount = round_to(amount, 2);
            CategoryShare {
                category,
                label: category.label(),
                amount,
                percent: round_to(amount / denom * 100.0, 1),
            }
        })
        .collect()
}
