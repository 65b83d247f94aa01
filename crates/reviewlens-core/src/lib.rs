//! Shared domain types and configuration for reviewlens.

pub mod app_config;
pub mod config;
pub mod query;
pub mod review;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use query::{QueryError, ReviewQuery};
pub use review::{RawReview, Review, Sentiment};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
