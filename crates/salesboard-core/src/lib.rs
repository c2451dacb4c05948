//! Shared domain types and configuration for the salesboard pipeline.

pub mod app_config;
pub mod brands;
pub mod config;
pub mod models;

use thiserror::Error;

pub use app_config::{
    AppConfig, DEFAULT_ALERT_THRESHOLD, DEFAULT_CACHE_TTL_SECS, DEFAULT_FETCH_CONCURRENCY,
};
pub use brands::Brand;
pub use config::{load_app_config, load_app_config_from_env};
pub use models::{
    AlertEntry, BrandSummary, DashboardSnapshot, ErrorRecord, Location, SalesDataset, SalesRecord,
    SalesRow,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
