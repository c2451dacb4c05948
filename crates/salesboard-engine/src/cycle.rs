//! The refresh-cycle state machine.
//!
//! `IDLE → CACHE_LOOKUP → {hit: DONE} | {miss: FETCHING → MERGING →
//! FILTERING → CACHED → DONE}`. Any unrecoverable failure during the cycle
//! degrades to a one-row sentinel dataset; nothing here returns an error to
//! the caller, and no retry is attempted — the next scheduled tick starts a
//! fresh cycle.

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::PgPool;

use salesboard_cache::SnapshotCache;
use salesboard_core::{AppConfig, DashboardSnapshot, SalesDataset};
use salesboard_salesmix::SalesMixClient;

use crate::aggregate::{
    bottom_n, detect_alerts, filter_zero_sales, summarize_by_brand, top_n, RankMetric, TOP_N,
};
use crate::fetch::fetch_all;

/// The single well-known cache key; each cycle fully overwrites it.
pub const CACHE_KEY: &str = "sales_data";

/// Owns everything one refresh cycle needs: the directory pool, the sales
/// API client, the cache handle, and the pipeline tunables. Constructed
/// once at startup and shared by the scheduler and the HTTP surface; holds
/// no state across cycles — the cache is the only thing that outlives one.
pub struct RefreshEngine {
    pool: PgPool,
    client: SalesMixClient,
    cache: Arc<SnapshotCache>,
    cache_ttl_secs: u64,
    fetch_concurrency: usize,
    alert_threshold: f64,
}

impl RefreshEngine {
    #[must_use]
    pub fn new(
        pool: PgPool,
        client: SalesMixClient,
        cache: Arc<SnapshotCache>,
        config: &AppConfig,
    ) -> Self {
        Self {
            pool,
            client,
            cache,
            cache_ttl_secs: config.cache_ttl_secs,
            fetch_concurrency: config.fetch_concurrency,
            alert_threshold: config.alert_threshold,
        }
    }

    /// Runs one refresh cycle for `date` and returns the filtered dataset.
    ///
    /// A cache hit short-circuits the whole pipeline. On a miss the cycle
    /// queries the directory, fans out the per-location fetches, filters
    /// zero-sales rows, and caches the result. Directory failure and an
    /// empty directory both degrade to sentinel datasets (with distinct
    /// messages); sentinel datasets are never cached, so the next tick
    /// retries from scratch.
    pub async fn run_cycle(&self, date: NaiveDate) -> SalesDataset {
        match self.cache.get::<SalesDataset>(CACHE_KEY).await {
            Ok(Some(dataset)) => {
                tracing::info!(
                    rows = dataset.len(),
                    backend = self.cache.backend_name(),
                    "serving cached dataset"
                );
                return dataset;
            }
            Ok(None) => {}
            // Fail open: a broken cache must not take the dashboard down.
            Err(e) => {
                tracing::warn!(error = %e, "cache read failed; treating as miss");
            }
        }

        let locations = match salesboard_db::list_active_locations(&self.pool).await {
            Ok(locations) if locations.is_empty() => {
                tracing::warn!("directory query returned no active locations");
                return SalesDataset::error("No active locations in directory");
            }
            Ok(locations) => locations,
            Err(e) => {
                tracing::error!(error = %e, "location directory query failed");
                return SalesDataset::error(format!("Error fetching location directory: {e}"));
            }
        };

        tracing::info!(count = locations.len(), "fetching sales for active locations");
        let rows = fetch_all(&self.client, &locations, date, self.fetch_concurrency).await;
        let dataset = filter_zero_sales(SalesDataset::new(rows));

        if dataset.has_errors() {
            tracing::warn!("cycle produced a sentinel dataset; skipping cache write");
            return dataset;
        }

        if let Err(e) = self
            .cache
            .set(CACHE_KEY, &dataset, self.cache_ttl_secs)
            .await
        {
            // Best effort: a failed write costs one cache window, nothing more.
            tracing::warn!(error = %e, "cache write failed");
        }

        dataset
    }

    /// Runs one cycle and derives the consumer-facing snapshot from it.
    pub async fn snapshot(&self, date: NaiveDate) -> DashboardSnapshot {
        let dataset = self.run_cycle(date).await;
        build_snapshot(&dataset, self.alert_threshold)
    }
}

/// Derives the full consumer contract from one dataset: brand summaries,
/// top/bottom performers, the alert feed, and the refresh line.
///
/// Sentinel datasets produce an error snapshot: empty tables, the message
/// in `error`, and an `Error occurred` refresh line.
#[must_use]
pub fn build_snapshot(dataset: &SalesDataset, alert_threshold: f64) -> DashboardSnapshot {
    if let Some(message) = dataset.first_error() {
        return DashboardSnapshot {
            brand_summaries: Vec::new(),
            top_locations: Vec::new(),
            bottom_locations: Vec::new(),
            alerts: Vec::new(),
            refreshed_at: dataset.refreshed_at,
            location_count: 0,
            refresh_line: "Error occurred".to_string(),
            error: Some(message.to_string()),
        };
    }

    DashboardSnapshot {
        brand_summaries: summarize_by_brand(dataset),
        top_locations: top_n(dataset, TOP_N, RankMetric::NetSales),
        bottom_locations: bottom_n(dataset, TOP_N, RankMetric::NetSales),
        alerts: detect_alerts(dataset, alert_threshold),
        refreshed_at: dataset.refreshed_at,
        location_count: dataset.len(),
        refresh_line: dataset.refresh_line(),
        error: None,
    }
}
