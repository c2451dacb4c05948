//! Pure aggregation and ranking over an already-fetched dataset.

use std::collections::BTreeMap;

use salesboard_core::{
    AlertEntry, Brand, BrandSummary, ErrorRecord, SalesDataset, SalesRecord, SalesRow,
};

/// Number of locations in the top/bottom performer tables.
pub const TOP_N: usize = 10;

/// Message carried by the sentinel row when filtering leaves nothing.
pub const NO_VALID_SALES: &str = "No valid sales data after filtering";

/// The metric locations are ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMetric {
    NetSales,
    CustomerCount,
    Tips,
}

impl RankMetric {
    fn value(self, record: &SalesRecord) -> f64 {
        match self {
            RankMetric::NetSales => record.total_net_sales,
            #[allow(clippy::cast_precision_loss)]
            RankMetric::CustomerCount => record.ending_count as f64,
            RankMetric::Tips => record.charged_tips,
        }
    }
}

/// Drops rows whose total net sales is exactly zero.
///
/// Error rows carry zeroed metrics, so they are dropped here too — a fully
/// failed location disappears from the aggregated views rather than skewing
/// them. When nothing survives the filter, the result is a single sentinel
/// error row, never an empty table: consumers always receive at least one
/// row. Idempotent: filtering a filtered dataset changes nothing.
#[must_use]
pub fn filter_zero_sales(dataset: SalesDataset) -> SalesDataset {
    let refreshed_at = dataset.refreshed_at;
    #[allow(clippy::float_cmp)]
    let rows: Vec<SalesRow> = dataset
        .rows
        .into_iter()
        .filter(|row| row.total_net_sales() != 0.0)
        .collect();

    if rows.is_empty() {
        return SalesDataset {
            refreshed_at,
            rows: vec![SalesRow::Error(ErrorRecord::sentinel(NO_VALID_SALES))],
        };
    }

    SalesDataset { refreshed_at, rows }
}

/// Sums net sales, customer count, and tips per brand.
///
/// The grouping key set is exactly the brands present in the input — a
/// brand with no rows produces no summary. Output is ordered by brand for
/// reproducibility.
#[must_use]
pub fn summarize_by_brand(dataset: &SalesDataset) -> Vec<BrandSummary> {
    let mut by_brand: BTreeMap<Brand, BrandSummary> = BTreeMap::new();

    for row in &dataset.rows {
        let SalesRow::Sales(record) = row else {
            continue;
        };
        let entry = by_brand.entry(record.brand).or_insert_with(|| BrandSummary {
            brand: record.brand,
            total_net_sales: 0.0,
            total_customers: 0,
            total_tips: 0.0,
        });
        entry.total_net_sales += record.total_net_sales;
        entry.total_customers += record.ending_count;
        entry.total_tips += record.charged_tips;
    }

    by_brand.into_values().collect()
}

/// The `n` highest-ranked locations by `metric`, descending.
///
/// The sort is stable, so ties keep input order. Result length is
/// `min(n, sales rows in input)`.
#[must_use]
pub fn top_n(dataset: &SalesDataset, n: usize, metric: RankMetric) -> Vec<SalesRecord> {
    let mut records = sales_records(dataset);
    records.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));
    records.truncate(n);
    records
}

/// The `n` lowest-ranked locations by `metric`, ascending.
///
/// The sort is stable, so ties keep input order. Result length is
/// `min(n, sales rows in input)`.
#[must_use]
pub fn bottom_n(dataset: &SalesDataset, n: usize, metric: RankMetric) -> Vec<SalesRecord> {
    let mut records = sales_records(dataset);
    records.sort_by(|a, b| metric.value(a).total_cmp(&metric.value(b)));
    records.truncate(n);
    records
}

/// Rows whose over/short magnitude exceeds `threshold`.
///
/// Never empty: when no location breaches, a single informational
/// `AllClear` entry stands in so the alert feed always has something to
/// show.
#[must_use]
pub fn detect_alerts(dataset: &SalesDataset, threshold: f64) -> Vec<AlertEntry> {
    let alerts: Vec<AlertEntry> = dataset
        .rows
        .iter()
        .filter_map(|row| match row {
            SalesRow::Sales(record) if record.over_short.abs() > threshold => {
                Some(AlertEntry::OverShort {
                    location: record.location.clone(),
                    amount: record.over_short,
                })
            }
            _ => None,
        })
        .collect();

    if alerts.is_empty() {
        return vec![AlertEntry::AllClear { threshold }];
    }
    alerts
}

fn sales_records(dataset: &SalesDataset) -> Vec<SalesRecord> {
    dataset
        .rows
        .iter()
        .filter_map(|row| match row {
            SalesRow::Sales(record) => Some(record.clone()),
            SalesRow::Error(_) => None,
        })
        .collect()
}
