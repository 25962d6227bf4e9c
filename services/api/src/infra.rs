use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use credit_engine::config::AppConfig;
use credit_engine::scoring::{
    FileDirectionStore, HttpScoringOracle, PolicyConfig, ScoringEngine,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type ProductionEngine = ScoringEngine<HttpScoringOracle, FileDirectionStore>;

/// Wire the production oracle client, direction cache, and policy defaults
/// into an engine. The oracle handle is returned separately for the startup
/// health probe.
pub(crate) fn build_scoring_stack(
    config: &AppConfig,
) -> (Arc<HttpScoringOracle>, Arc<ProductionEngine>) {
    let oracle = Arc::new(HttpScoringOracle::new(&config.oracle));
    let store = Arc::new(FileDirectionStore::new(
        config.calibration.cache_path.clone(),
    ));
    let engine = Arc::new(ScoringEngine::new(
        oracle.clone(),
        store,
        PolicyConfig::default(),
    ));
    (oracle, engine)
}
