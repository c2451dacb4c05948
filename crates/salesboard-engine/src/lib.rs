//! The fetch/cache/aggregate pipeline.
//!
//! One refresh cycle: cache lookup (hit short-circuits everything), then
//! directory query, concurrent per-location fetch, zero-sales filtering,
//! and a best-effort cache write. Aggregation over the resulting dataset is
//! pure and recomputed by consumers on every cycle.

pub mod aggregate;
pub mod cycle;
pub mod fetch;

pub use aggregate::{
    bottom_n, detect_alerts, filter_zero_sales, summarize_by_brand, top_n, RankMetric,
    NO_VALID_SALES, TOP_N,
};
pub use cycle::{build_snapshot, RefreshEngine, CACHE_KEY};
pub use fetch::fetch_all;
