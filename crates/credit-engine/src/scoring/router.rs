use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::calibration::DirectionStore;
use super::domain::ApplicationFacts;
use super::engine::{ScoringEngine, ScoringError};
use super::oracle::{OracleError, ScoringOracle};

/// Router builder exposing the scoring endpoint.
pub fn scoring_router<O, S>(engine: Arc<ScoringEngine<O, S>>) -> Router
where
    O: ScoringOracle + 'static,
    S: DirectionStore + 'static,
{
    Router::new()
        .route("/api/v1/applications/score", post(score_handler::<O, S>))
        .with_state(engine)
}

pub(crate) async fn score_handler<O, S>(
    State(engine): State<Arc<ScoringEngine<O, S>>>,
    axum::Json(facts): axum::Json<ApplicationFacts>,
) -> Response
where
    O: ScoringOracle + 'static,
    S: DirectionStore + 'static,
{
    // The oracle call blocks; run the evaluation on the blocking pool.
    let outcome = tokio::task::spawn_blocking(move || engine.evaluate(&facts)).await;

    match outcome {
        Ok(Ok(result)) => (StatusCode::OK, axum::Json(result)).into_response(),
        Ok(Err(ScoringError::InvalidFacts(error))) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Ok(Err(ScoringError::Oracle(OracleError::Unavailable { reason }))) => {
            let payload = json!({
                "error": format!("scoring oracle unavailable: {reason}"),
                "recoverable": true,
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Ok(Err(other)) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(join_error) => {
            let payload = json!({
                "error": format!("scoring task failed: {join_error}"),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
