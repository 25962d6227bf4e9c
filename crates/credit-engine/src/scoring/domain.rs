use serde::{Deserialize, Serialize};

/// Length of the feature vector the oracle was trained on.
pub const FEATURE_COUNT: usize = 200;

/// Feature positions empirically influential on the oracle's prediction,
/// in fixed probing order.
pub const SALIENT_INDICES: [usize; 10] = [6, 12, 26, 53, 81, 110, 139, 146, 166, 174];

/// Applicant-declared financial facts for a single scoring request.
///
/// Validated once at intake and never mutated afterwards. Monetary fields are
/// monthly amounts except `loan_amount` and `down_payment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationFacts {
    pub loan_amount: f64,
    #[serde(default)]
    pub down_payment: f64,
    pub term_months: u32,
    #[serde(default)]
    pub insurance: bool,
    pub monthly_income: f64,
    #[serde(default)]
    pub monthly_charges: f64,
    #[serde(default)]
    pub other_credit_payments: f64,
}

impl ApplicationFacts {
    /// Check the intake invariants: every amount non-negative and finite,
    /// term strictly positive.
    pub fn validate(&self) -> Result<(), FactsError> {
        let amounts = [
            ("loan_amount", self.loan_amount),
            ("down_payment", self.down_payment),
            ("monthly_income", self.monthly_income),
            ("monthly_charges", self.monthly_charges),
            ("other_credit_payments", self.other_credit_payments),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(FactsError::InvalidAmount { field });
            }
        }
        if self.term_months == 0 {
            return Err(FactsError::ZeroTerm);
        }
        Ok(())
    }
}

/// Validation failure for submitted facts. Fatal to the request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactsError {
    #[error("{field} must be a non-negative finite number")]
    InvalidAmount { field: &'static str },
    #[error("term_months must be greater than zero")]
    ZeroTerm,
}

/// Ordered sequence of feature values in the oracle's agreed feature order.
///
/// Produced fresh per scoring request and never persisted. The wrapper does
/// not enforce the length; the oracle client checks it as a precondition.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// All-zero vector of the agreed length, used as the calibration baseline.
    pub fn zeroed() -> Self {
        Self(vec![0.0; FEATURE_COUNT])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.0
    }
}

/// Financial metrics derived deterministically from the facts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffordabilityMetrics {
    pub financed_amount: f64,
    pub monthly_installment: f64,
    pub total_monthly_obligations: f64,
    /// Percentage of monthly income consumed by all recurring obligations.
    pub debt_to_income_ratio: f64,
    pub disposable_income: f64,
}

/// Final adjudication surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub const fn label(self) -> &'static str {
        match self {
            Decision::Accept => "accept",
            Decision::Reject => "reject",
        }
    }
}

/// Complete outcome of one scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub raw_probability: f64,
    pub final_probability: f64,
    pub debt_to_income_ratio: f64,
    pub monthly_installment: f64,
    pub disposable_income: f64,
    /// 0-1000 presentation value: round((1 - final_probability) * 1000).
    pub solvency_score: u32,
    pub decision: Decision,
}
