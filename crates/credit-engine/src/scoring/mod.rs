//! Scoring decision engine: synthetic feature generation, one-time direction
//! calibration, the remote oracle contract, and the policy overlay that turns
//! a raw probability into a final decision.

pub mod calibration;
pub mod domain;
mod engine;
pub mod oracle;
mod policy;
pub mod router;
mod synthesizer;

#[cfg(test)]
mod tests;

pub use calibration::{
    DirectionCalibrator, DirectionMap, DirectionStore, FileDirectionStore, StoreError,
};
pub use domain::{
    AffordabilityMetrics, ApplicationFacts, Decision, FactsError, FeatureVector, ScoringResult,
    FEATURE_COUNT, SALIENT_INDICES,
};
pub use engine::{ScoringEngine, ScoringError};
pub use oracle::{HttpScoringOracle, OracleError, OracleScore, ScoringOracle};
pub use policy::{finalize, solvency_score, PolicyConfig};
pub use router::scoring_router;
pub use synthesizer::{affordability, risk_score, synthesize, INSURANCE_RATE, INTEREST_RATE};
