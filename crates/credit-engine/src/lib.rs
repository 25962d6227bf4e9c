//! Scoring decision engine for personal loan applications.
//!
//! Turns validated applicant facts into a synthetic feature vector, asks the
//! remote scoring oracle for a default-risk probability, and overlays the
//! policy rules before surfacing an accept/reject decision.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
