use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::domain::{FeatureVector, FEATURE_COUNT};
use crate::config::OracleConfig;

/// Prediction returned by the scoring oracle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OracleScore {
    pub prediction: u8,
    /// Default-risk probability in [0, 1].
    pub probability: f64,
}

/// Seam for the opaque classifier service so scoring can be exercised with
/// stubs.
pub trait ScoringOracle: Send + Sync {
    fn score(&self, features: &FeatureVector) -> Result<OracleScore, OracleError>;
}

/// Error enumeration for oracle calls.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("feature vector must contain exactly {expected} values, got {actual}")]
    InvalidInput { expected: usize, actual: usize },
    #[error("scoring oracle unavailable: {reason}")]
    Unavailable { reason: String },
}

#[derive(Serialize)]
struct ScoreRequest<'a> {
    features: &'a [f64],
}

// The oracle also returns risk_level/message strings; ignored here.
#[derive(Deserialize)]
struct ScoreResponse {
    prediction: u8,
    probability: f64,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

/// Production client for the remote scoring oracle.
///
/// Single attempt per call with a bounded timeout; callers own any retry or
/// fallback policy.
pub struct HttpScoringOracle {
    base_url: String,
    timeout: Duration,
}

impl HttpScoringOracle {
    pub fn new(config: &OracleConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        }
    }

    fn client(&self) -> Result<reqwest::blocking::Client, OracleError> {
        reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| OracleError::Unavailable {
                reason: err.to_string(),
            })
    }

    /// Best-effort liveness probe against the oracle's health endpoint.
    pub fn health(&self) -> Result<String, OracleError> {
        let response = self
            .client()?
            .get(format!("{}/health", self.base_url))
            .send()
            .map_err(|err| OracleError::Unavailable {
                reason: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Unavailable {
                reason: format!("health endpoint returned HTTP {status}"),
            });
        }

        let body: HealthResponse = response.json().map_err(|err| OracleError::Unavailable {
            reason: format!("malformed health response: {err}"),
        })?;
        Ok(body.status)
    }
}

impl ScoringOracle for HttpScoringOracle {
    fn score(&self, features: &FeatureVector) -> Result<OracleScore, OracleError> {
        if features.len() != FEATURE_COUNT {
            return Err(OracleError::InvalidInput {
                expected: FEATURE_COUNT,
                actual: features.len(),
            });
        }

        let response = self
            .client()?
            .post(format!("{}/predict", self.base_url))
            .json(&ScoreRequest {
                features: features.as_slice(),
            })
            .send()
            .map_err(|err| OracleError::Unavailable {
                reason: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Unavailable {
                reason: format!("oracle returned HTTP {status}"),
            });
        }

        let body: ScoreResponse = response.json().map_err(|err| OracleError::Unavailable {
            reason: format!("malformed oracle response: {err}"),
        })?;

        if !(0.0..=1.0).contains(&body.probability) {
            return Err(OracleError::Unavailable {
                reason: format!("probability {} outside [0, 1]", body.probability),
            });
        }

        Ok(OracleScore {
            prediction: body.prediction,
            probability: body.probability,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OracleConfig;

    fn oracle() -> HttpScoringOracle {
        HttpScoringOracle::new(&OracleConfig {
            base_url: "http://127.0.0.1:5000/".to_string(),
            timeout: Duration::from_secs(8),
        })
    }

    #[test]
    fn wrong_length_vector_fails_before_any_network_io() {
        let short = FeatureVector::new(vec![0.0; 3]);
        match oracle().score(&short) {
            Err(OracleError::InvalidInput { expected, actual }) => {
                assert_eq!(expected, FEATURE_COUNT);
                assert_eq!(actual, 3);
            }
            other => panic!("expected invalid input error, got {other:?}"),
        }
    }

    #[test]
    fn trailing_slash_is_normalized() {
        assert_eq!(oracle().base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn score_response_tolerates_extra_fields() {
        let body: ScoreResponse = serde_json::from_str(
            r#"{"prediction": 1, "probability": 0.82, "risk_level": "High", "message": "Transaction Suspecte"}"#,
        )
        .expect("response parses");
        assert_eq!(body.prediction, 1);
        assert!((body.probability - 0.82).abs() < f64::EPSILON);
    }
}
