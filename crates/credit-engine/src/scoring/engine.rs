use std::sync::{Arc, OnceLock};

use tracing::debug;

use super::calibration::{DirectionCalibrator, DirectionMap, DirectionStore};
use super::domain::{ApplicationFacts, FactsError, ScoringResult};
use super::oracle::{OracleError, ScoringOracle};
use super::policy::{finalize, solvency_score, PolicyConfig};
use super::synthesizer::synthesize;

/// Engine composing the calibrator, synthesizer, oracle client, and policy
/// overlay behind a single synchronous entry point.
pub struct ScoringEngine<O, S> {
    oracle: Arc<O>,
    calibrator: DirectionCalibrator<O, S>,
    policy: PolicyConfig,
    directions: OnceLock<DirectionMap>,
}

impl<O, S> ScoringEngine<O, S>
where
    O: ScoringOracle,
    S: DirectionStore,
{
    pub fn new(oracle: Arc<O>, store: Arc<S>, policy: PolicyConfig) -> Self {
        Self {
            calibrator: DirectionCalibrator::new(oracle.clone(), store),
            oracle,
            policy,
            directions: OnceLock::new(),
        }
    }

    /// Direction map for this process, calibrating on first use. Concurrent
    /// first calls race safely; the computed map is identical.
    pub fn direction_map(&self) -> &DirectionMap {
        self.directions
            .get_or_init(|| self.calibrator.calibrate())
    }

    /// Score one application end-to-end: validate, synthesize, consult the
    /// oracle, then apply the policy overlay.
    pub fn evaluate(&self, facts: &ApplicationFacts) -> Result<ScoringResult, ScoringError> {
        facts.validate()?;

        let directions = self.direction_map();
        let (features, metrics) = synthesize(facts, directions);
        let raw_probability = self.oracle.score(&features)?.probability;
        let (final_probability, decision) =
            finalize(&self.policy, raw_probability, metrics.debt_to_income_ratio);

        debug!(
            raw_probability,
            final_probability,
            debt_to_income_ratio = metrics.debt_to_income_ratio,
            decision = decision.label(),
            degraded_directions = directions.is_degraded(),
            "application scored"
        );

        Ok(ScoringResult {
            raw_probability,
            final_probability,
            debt_to_income_ratio: metrics.debt_to_income_ratio,
            monthly_installment: metrics.monthly_installment,
            disposable_income: metrics.disposable_income,
            solvency_score: solvency_score(final_probability),
            decision,
        })
    }
}

/// Error raised by the scoring engine.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    InvalidFacts(#[from] FactsError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
}
