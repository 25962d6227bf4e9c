use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::scoring::calibration::{DirectionMap, DirectionStore, StoreError};
use crate::scoring::domain::ApplicationFacts;
use crate::scoring::oracle::{OracleError, OracleScore, ScoringOracle};
use crate::scoring::{FeatureVector, PolicyConfig, ScoringEngine};

pub(super) fn facts() -> ApplicationFacts {
    ApplicationFacts {
        loan_amount: 10_000.0,
        down_payment: 0.0,
        term_months: 24,
        insurance: false,
        monthly_income: 2_500.0,
        monthly_charges: 800.0,
        other_credit_payments: 0.0,
    }
}

/// Oracle stub returning a fixed probability, counting calls.
pub(super) struct FixedOracle {
    pub(super) probability: f64,
    pub(super) calls: AtomicUsize,
}

impl FixedOracle {
    pub(super) fn new(probability: f64) -> Self {
        Self {
            probability,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl ScoringOracle for FixedOracle {
    fn score(&self, _features: &FeatureVector) -> Result<OracleScore, OracleError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(OracleScore {
            prediction: u8::from(self.probability > 0.5),
            probability: self.probability,
        })
    }
}

/// Oracle stub whose prediction rises only when a perturbed position belongs
/// to the configured upward set, so probing recovers known directions.
pub(super) struct DirectionalOracle {
    pub(super) upward: HashSet<usize>,
    pub(super) calls: AtomicUsize,
}

impl DirectionalOracle {
    pub(super) fn new(upward: impl IntoIterator<Item = usize>) -> Self {
        Self {
            upward: upward.into_iter().collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl ScoringOracle for DirectionalOracle {
    fn score(&self, features: &FeatureVector) -> Result<OracleScore, OracleError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let perturbed = features
            .as_slice()
            .iter()
            .position(|&value| value != 0.0);
        let probability = match perturbed {
            Some(index) if self.upward.contains(&index) => 0.9,
            Some(_) => 0.1,
            None => 0.5,
        };
        Ok(OracleScore {
            prediction: u8::from(probability > 0.5),
            probability,
        })
    }
}

/// Oracle stub that is always unreachable.
pub(super) struct UnreachableOracle;

impl ScoringOracle for UnreachableOracle {
    fn score(&self, _features: &FeatureVector) -> Result<OracleScore, OracleError> {
        Err(OracleError::Unavailable {
            reason: "connection refused".to_string(),
        })
    }
}

/// In-memory direction store recording saves.
#[derive(Default)]
pub(super) struct MemoryDirectionStore {
    map: Mutex<Option<DirectionMap>>,
}

impl MemoryDirectionStore {
    pub(super) fn with_map(map: DirectionMap) -> Self {
        Self {
            map: Mutex::new(Some(map)),
        }
    }

    pub(super) fn saved(&self) -> Option<DirectionMap> {
        self.map.lock().expect("store mutex poisoned").clone()
    }
}

impl DirectionStore for MemoryDirectionStore {
    fn load(&self) -> Result<Option<DirectionMap>, StoreError> {
        Ok(self.map.lock().expect("store mutex poisoned").clone())
    }

    fn save(&self, map: &DirectionMap) -> Result<(), StoreError> {
        *self.map.lock().expect("store mutex poisoned") = Some(map.clone());
        Ok(())
    }
}

pub(super) fn engine_with<O: ScoringOracle>(
    oracle: Arc<O>,
) -> ScoringEngine<O, MemoryDirectionStore> {
    ScoringEngine::new(
        oracle,
        Arc::new(MemoryDirectionStore::default()),
        PolicyConfig::default(),
    )
}
