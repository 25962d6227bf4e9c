use crate::cli::ServeArgs;
use crate::infra::{build_scoring_stack, AppState};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_engine::config::AppConfig;
use credit_engine::error::AppError;
use credit_engine::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let (oracle, engine) = build_scoring_stack(&config);

    // Best effort: a down oracle degrades scoring but must not block startup.
    let probe = oracle.clone();
    match tokio::task::spawn_blocking(move || probe.health()).await {
        Ok(Ok(status)) => info!(%status, "scoring oracle reachable"),
        Ok(Err(err)) => warn!(error = %err, "scoring oracle health probe failed"),
        Err(err) => warn!(error = %err, "scoring oracle health probe did not complete"),
    }

    let app = with_scoring_routes(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, oracle = %config.oracle.base_url, "scoring engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
