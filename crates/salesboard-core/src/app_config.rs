//! Application configuration resolved from the environment.

use std::net::SocketAddr;

/// Default TTL for the cached dataset snapshot, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 900;

/// Default bound on concurrent in-flight per-location fetches.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 10;

/// Default over/short magnitude (in currency units) above which a location
/// raises an alert.
pub const DEFAULT_ALERT_THRESHOLD: f64 = 30.0;

/// All runtime configuration for the salesboard binaries.
///
/// Built by [`crate::config::load_app_config`]; every field has either a
/// required env var or a documented default behind it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string for the location directory.
    pub database_url: String,
    /// Base URL of the remote sales-mix API.
    pub api_base_url: String,
    /// `authenticationtoken` header value for the sales-mix API.
    pub api_token: String,
    /// `password` header value for the sales-mix API.
    pub api_password: String,
    /// `sitename` header value for the sales-mix API.
    pub api_sitename: String,
    /// `userid` header value for the sales-mix API.
    pub api_userid: String,
    /// Networked cache address; absence selects the in-process backend.
    pub redis_url: Option<String>,
    /// TTL for the cached dataset snapshot, in seconds.
    pub cache_ttl_secs: u64,
    /// Bound on concurrent in-flight per-location fetches.
    pub fetch_concurrency: usize,
    /// Per-request timeout for the sales-mix API, in seconds.
    pub request_timeout_secs: u64,
    /// Over/short magnitude above which a location raises an alert.
    pub alert_threshold: f64,
    /// Cron expression driving the data-refresh tick.
    pub refresh_cron: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}
