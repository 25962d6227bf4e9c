mod store;

pub use store::{DirectionStore, FileDirectionStore, StoreError};

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{FeatureVector, SALIENT_INDICES};
use super::oracle::{OracleError, ScoringOracle};

/// Perturbation applied to one salient position of the all-zero baseline when
/// probing the oracle.
const PROBE_DELTA: f64 = 0.35;

/// Signed influence of each salient feature on the predicted risk.
///
/// Probed from a fixed all-zero baseline, never from user data, so the signs
/// are stable across users and across sessions for a given oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionMap {
    signs: BTreeMap<usize, i8>,
    degraded: bool,
}

impl DirectionMap {
    pub fn from_signs(signs: BTreeMap<usize, i8>) -> Self {
        Self {
            signs,
            degraded: false,
        }
    }

    /// Deterministic alternating substitute used when the oracle cannot be
    /// probed. Kept in memory only.
    pub fn degraded_fallback() -> Self {
        let signs = SALIENT_INDICES
            .iter()
            .enumerate()
            .map(|(position, &index)| (index, if position % 2 == 0 { 1 } else { -1 }))
            .collect();
        Self {
            signs,
            degraded: true,
        }
    }

    pub fn sign(&self, index: usize) -> Option<i8> {
        self.signs.get(&index).copied()
    }

    /// Complete means every salient index carries a valid sign.
    pub fn is_complete(&self) -> bool {
        SALIENT_INDICES
            .iter()
            .all(|index| matches!(self.signs.get(index), Some(1 | -1)))
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn signs(&self) -> &BTreeMap<usize, i8> {
        &self.signs
    }
}

/// Learns whether increasing each salient feature raises or lowers the
/// predicted risk, consulting the durable cache first.
pub struct DirectionCalibrator<O, S> {
    oracle: Arc<O>,
    store: Arc<S>,
}

impl<O, S> DirectionCalibrator<O, S>
where
    O: ScoringOracle,
    S: DirectionStore,
{
    pub fn new(oracle: Arc<O>, store: Arc<S>) -> Self {
        Self { oracle, store }
    }

    /// Load or compute the direction map. Never fails: an unreachable oracle
    /// yields the degraded fallback so calibration cannot block scoring.
    pub fn calibrate(&self) -> DirectionMap {
        match self.store.load() {
            Ok(Some(map)) if map.is_complete() => {
                debug!("direction map loaded from cache");
                return map;
            }
            Ok(Some(_)) => debug!("cached direction map incomplete; recalibrating"),
            Ok(None) => {}
            Err(err) => debug!(error = %err, "direction cache unreadable; recalibrating"),
        }

        match self.probe() {
            Ok(map) => {
                if let Err(err) = self.store.save(&map) {
                    warn!(error = %err, "failed to persist direction map");
                }
                info!(signs = map.signs().len(), "direction map calibrated");
                map
            }
            Err(err) => {
                warn!(error = %err, "oracle unreachable during calibration; using alternating fallback");
                DirectionMap::degraded_fallback()
            }
        }
    }

    fn probe(&self) -> Result<DirectionMap, OracleError> {
        let baseline = FeatureVector::zeroed();
        let baseline_probability = self.oracle.score(&baseline)?.probability;

        let mut signs = BTreeMap::new();
        for &index in &SALIENT_INDICES {
            let mut perturbed = baseline.clone();
            perturbed.values_mut()[index] += PROBE_DELTA;
            let probability = self.oracle.score(&perturbed)?.probability;
            signs.insert(
                index,
                if probability > baseline_probability {
                    1
                } else {
                    -1
                },
            );
        }

        Ok(DirectionMap::from_signs(signs))
    }
}
