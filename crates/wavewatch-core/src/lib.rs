//! Domain types, configuration, and the carrier recommendation engine for WaveWatch.

pub mod app_config;
pub mod config;
pub mod location;
pub mod recommend;
pub mod samples;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use location::{filter_by_location, location_matches};
pub use recommend::{
    aggregate_by_carrier, recommend_for_location, recommend_providers, score_breakdown,
    CarrierAggregate, CarrierAverages, ScoreBreakdown, MIN_SAMPLES,
};
pub use samples::{NetworkSample, NewFeedback, NewNetworkLog, Recommendation};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}
