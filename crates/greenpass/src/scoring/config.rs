use serde::{Deserialize, Serialize};

use super::sanitize::sanitize;

fn default_cap_s1() -> f64 {
    40.0
}

fn default_cap_s2() -> f64 {
    70.0
}

fn default_cap_s3() -> f64 {
    80.0
}

/// Ceilings on each raw category score, in score points. A category left out
/// of a partial payload keeps its product default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryCaps {
    #[serde(rename = "S1", default = "default_cap_s1")]
    pub s1: f64,
    #[serde(rename = "S2", default = "default_cap_s2")]
    pub s2: f64,
    #[serde(rename = "S3", default = "default_cap_s3")]
    pub s3: f64,
}

impl Default for CategoryCaps {
    fn default() -> Self {
        Self {
            s1: default_cap_s1(),
            s2: default_cap_s2(),
            s3: default_cap_s3(),
        }
    }
}

/// Relative importance of each category. Unlike caps, a category missing
/// from a partial payload weighs zero: senders replace the whole mix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    #[serde(rename = "S1", default)]
    pub s1: f64,
    #[serde(rename = "S2", default)]
    pub s2: f64,
    #[serde(rename = "S3", default)]
    pub s3: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            s1: 0.35,
            s2: 0.45,
            s3: 0.20,
        }
    }
}

/// Tunable knobs of the scoring model. Construct through [`ScoreConfig::new`]
/// (or `default()`) so the values are already sanitized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreConfig {
    #[serde(default)]
    pub caps: CategoryCaps,
    #[serde(default)]
    pub weights: CategoryWeights,
}

impl ScoreConfig {
    pub fn new(caps: Option<CategoryCaps>, weights: Option<CategoryWeights>) -> Self {
        Self {
            caps: caps.unwrap_or_default(),
            weights: weights.unwrap_or_default(),
        }
        .sanitized()
    }

    /// Copy with every cap and weight clamped to finite non-negative values.
    pub fn sanitized(self) -> Self {
        Self {
            caps: CategoryCaps {
                s1: sanitize(self.caps.s1),
                s2: sanitize(self.caps.s2),
                s3: sanitize(self.caps.s3),
            },
            weights: CategoryWeights {
                s1: sanitize(self.weights.s1),
                s2: sanitize(self.weights.s2),
                s3: sanitize(self.weights.s3),
            },
        }
    }

    /// Weights rescaled to sum to one. A mix that sums to zero is left
    /// untouched, which makes every weight zero and pins the index at zero.
    pub(crate) fn normalized_weights(&self) -> CategoryWeights {
        let weights = self.weights;
        let sum = weights.s1 + weights.s2 + weights.s3;
        let divisor = if sum > 0.0 { sum } else { 1.0 };
        CategoryWeights {
            s1: weights.s1 / divisor,
            s2: weights.s2 / divisor,
            s3: weights.s3 / divisor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_caps_and_weights_match_the_product_model() {
        let config = ScoreConfig::default();
        assert_eq!(config.caps.s1, 40.0);
        assert_eq!(config.caps.s2, 70.0);
        assert_eq!(config.caps.s3, 80.0);
        assert_eq!(config.weights.s1, 0.35);
        assert_eq!(config.weights.s2, 0.45);
        assert_eq!(config.weights.s3, 0.20);
    }

    #[test]
    fn partial_caps_payload_keeps_named_defaults() {
        let caps: CategoryCaps =
            serde_json::from_str(r#"{ "S2": 50 }"#).expect("partial caps parse");
        assert_eq!(caps.s1, 40.0);
        assert_eq!(caps.s2, 50.0);
        assert_eq!(caps.s3, 80.0);
    }

    #[test]
    fn partial_weights_payload_zeroes_missing_categories() {
        let weights: CategoryWeights =
            serde_json::from_str(r#"{ "S1": 1.0 }"#).expect("partial weights parse");
        assert_eq!(weights.s1, 1.0);
        assert_eq!(weights.s2, 0.0);
        assert_eq!(weights.s3, 0.0);
    }

    #[test]
    fn sanitizing_clamps_negative_knobs() {
        let config = ScoreConfig {
            caps: CategoryCaps {
                s1: -5.0,
                s2: 70.0,
                s3: f64::NAN,
            },
            weights: CategoryWeights {
                s1: -0.5,
                s2: 0.45,
                s3: 0.20,
            },
        }
        .sanitized();
        assert_eq!(config.caps.s1, 0.0);
        assert_eq!(config.caps.s3, 0.0);
        assert_eq!(config.weights.s1, 0.0);
    }

    #[test]
    fn normalization_rescales_to_unit_sum() {
        let config = ScoreConfig {
            caps: CategoryCaps::default(),
            weights: CategoryWeights {
                s1: 2.0,
                s2: 1.0,
                s3: 1.0,
            },
        };
        let normalized = config.normalized_weights();
        assert_eq!(normalized.s1, 0.5);
        assert_eq!(normalized.s2, 0.25);
        assert_eq!(normalized.s3, 0.25);
    }

    #[test]
    fn zero_weight_mix_stays_zero_after_normalization() {
        let config = ScoreConfig {
            caps: CategoryCaps::default(),
            weights: CategoryWeights {
                s1: 0.0,
                s2: 0.0,
                s3: 0.0,
            },
        };
        let normalized = config.normalized_weights();
        assert_eq!(normalized.s1, 0.0);
        assert_eq!(normalized.s2, 0.0);
        assert_eq!(normalized.s3, 0.0);
    }
}
