use serde::{Deserialize, Serialize};

use super::domain::Decision;

/// Policy bands bounding the model's opinion. Ratio thresholds are
/// percentages; probability bounds are in [0, 1].
///
/// Boundary convention: ratios of exactly 33 and 45 fall in the middle band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub low_ratio_threshold: f64,
    pub high_ratio_threshold: f64,
    pub low_band_ceiling: f64,
    pub middle_band_floor: f64,
    pub high_band_floor: f64,
    pub rejection_threshold: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            low_ratio_threshold: 33.0,
            high_ratio_threshold: 45.0,
            low_band_ceiling: 0.30,
            middle_band_floor: 0.45,
            high_band_floor: 0.70,
            rejection_threshold: 0.5,
        }
    }
}

/// Clamp the raw probability into the policy band selected by the
/// debt-to-income ratio, then adjudicate. First matching band wins.
pub fn finalize(
    policy: &PolicyConfig,
    raw_probability: f64,
    debt_to_income_ratio: f64,
) -> (f64, Decision) {
    let final_probability = if debt_to_income_ratio < policy.low_ratio_threshold {
        raw_probability.min(policy.low_band_ceiling)
    } else if debt_to_income_ratio > policy.high_ratio_threshold {
        raw_probability.max(policy.high_band_floor)
    } else {
        raw_probability.max(policy.middle_band_floor)
    };

    let decision = if final_probability < policy.rejection_threshold {
        Decision::Accept
    } else {
        Decision::Reject
    };

    (final_probability, decision)
}

/// 0-1000 gauge value displayed to applicants.
pub fn solvency_score(final_probability: f64) -> u32 {
    ((1.0 - final_probability.clamp(0.0, 1.0)) * 1_000.0).round() as u32
}
