//! Row and dataset types flowing through the fetch/cache/aggregate pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::brands::Brand;

/// Identity placeholder used on dataset-level sentinel rows, where no
/// single location is responsible for the failure.
pub const UNKNOWN_IDENTITY: &str = "Unknown";

/// An active location from the directory, with its derived brand.
///
/// Immutable once read; lives only for the duration of one fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub code: String,
    pub name: String,
    pub brand: Brand,
}

impl Location {
    /// Builds a location, deriving the brand from the name.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        let brand = Brand::classify(&name);
        Self {
            code: code.into(),
            name,
            brand,
        }
    }
}

/// One successfully fetched sales row for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub location: String,
    pub location_code: String,
    pub brand: Brand,
    pub transaction_date: Option<NaiveDate>,
    pub charged_tips: f64,
    pub ending_count: i64,
    pub total_net_sales: f64,
    pub paid_outs: f64,
    pub book_cash: f64,
    pub over_short: f64,
}

/// Sentinel row substituted when a fetch (or a whole cycle) fails.
///
/// Carries the identity fields that are still known plus the stringified
/// cause; all metrics are implicitly zero. `brand` is `None` only on
/// dataset-level sentinels, where no single location is involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
    pub location: String,
    pub location_code: String,
    pub brand: Option<Brand>,
}

impl ErrorRecord {
    /// Sentinel for a failure with no attributable location.
    #[must_use]
    pub fn sentinel(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            location: UNKNOWN_IDENTITY.to_string(),
            location_code: UNKNOWN_IDENTITY.to_string(),
            brand: None,
        }
    }
}

/// One row of a [`SalesDataset`]: either real sales data or an error
/// sentinel. A failed location produces an `Error` row rather than being
/// dropped, so consumers can detect and surface the failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SalesRow {
    Sales(SalesRecord),
    Error(ErrorRecord),
}

impl SalesRow {
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            SalesRow::Sales(r) => &r.location,
            SalesRow::Error(e) => &e.location,
        }
    }

    #[must_use]
    pub fn location_code(&self) -> &str {
        match self {
            SalesRow::Sales(r) => &r.location_code,
            SalesRow::Error(e) => &e.location_code,
        }
    }

    #[must_use]
    pub fn brand(&self) -> Option<Brand> {
        match self {
            SalesRow::Sales(r) => Some(r.brand),
            SalesRow::Error(e) => e.brand,
        }
    }

    /// Total net sales for the row; error rows carry zeroed metrics.
    #[must_use]
    pub fn total_net_sales(&self) -> f64 {
        match self {
            SalesRow::Sales(r) => r.total_net_sales,
            SalesRow::Error(_) => 0.0,
        }
    }

    /// Over/short variance for the row; error rows carry zeroed metrics.
    #[must_use]
    pub fn over_short(&self) -> f64 {
        match self {
            SalesRow::Sales(r) => r.over_short,
            SalesRow::Error(_) => 0.0,
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SalesRow::Sales(_) => None,
            SalesRow::Error(e) => Some(&e.error),
        }
    }
}

/// The merged rows of one fetch cycle: the unit that is cached and the unit
/// that is aggregated.
///
/// The refresh timestamp lives on the dataset rather than on each row, so
/// the all-rows-share-one-timestamp invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesDataset {
    pub refreshed_at: DateTime<Utc>,
    pub rows: Vec<SalesRow>,
}

impl SalesDataset {
    /// Wraps rows with a fresh refresh timestamp.
    #[must_use]
    pub fn new(rows: Vec<SalesRow>) -> Self {
        Self {
            refreshed_at: Utc::now(),
            rows,
        }
    }

    /// A one-row sentinel dataset for a failure that aborted the cycle.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(vec![SalesRow::Error(ErrorRecord::sentinel(message))])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether any row is an error sentinel.
    ///
    /// Post-filter datasets contain error rows only when the whole cycle
    /// degraded to a sentinel, so consumers use this to switch to an error
    /// banner.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.rows.iter().any(|r| matches!(r, SalesRow::Error(_)))
    }

    /// First error message in the dataset, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        self.rows.iter().find_map(SalesRow::error_message)
    }

    /// The consumer-facing refresh line, e.g.
    /// `Last refreshed: 2026-08-28 14:00:00 | Data for 42 locations`.
    #[must_use]
    pub fn refresh_line(&self) -> String {
        format!(
            "Last refreshed: {} | Data for {} locations",
            self.refreshed_at.format("%Y-%m-%d %H:%M:%S"),
            self.rows.len()
        )
    }
}

/// Per-brand totals for one cycle. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandSummary {
    pub brand: Brand,
    pub total_net_sales: f64,
    pub total_customers: i64,
    pub total_tips: f64,
}

/// One alert-feed entry. The feed is never empty: when no location breaches
/// the threshold, a single informational `AllClear` entry stands in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertEntry {
    OverShort { location: String, amount: f64 },
    AllClear { threshold: f64 },
}

impl std::fmt::Display for AlertEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertEntry::OverShort { location, amount } => {
                write!(f, "{location}: Over/Short ${amount:.2}")
            }
            AlertEntry::AllClear { threshold } => {
                write!(f, "No Over/Short alerts (\u{b1}${threshold:.0})")
            }
        }
    }
}

/// Everything the presentation layer needs from one refresh cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub brand_summaries: Vec<BrandSummary>,
    pub top_locations: Vec<SalesRecord>,
    pub bottom_locations: Vec<SalesRecord>,
    pub alerts: Vec<AlertEntry>,
    pub refreshed_at: DateTime<Utc>,
    pub location_count: usize,
    pub refresh_line: String,
    /// Set when the cycle degraded to a sentinel dataset; consumers render
    /// an error banner instead of the tables.
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales_row(code: &str, net: f64) -> SalesRow {
        SalesRow::Sales(SalesRecord {
            location: format!("FG - TOR{code}"),
            location_code: code.to_string(),
            brand: Brand::FiveGuysCanada,
            transaction_date: None,
            charged_tips: 0.0,
            ending_count: 0,
            total_net_sales: net,
            paid_outs: 0.0,
            book_cash: 0.0,
            over_short: 0.0,
        })
    }

    #[test]
    fn location_new_derives_brand() {
        let loc = Location::new("1001", "BZ Downtown");
        assert_eq!(loc.brand, Brand::BlazePizza);
    }

    #[test]
    fn error_dataset_is_single_sentinel_row() {
        let ds = SalesDataset::error("boom");
        assert_eq!(ds.len(), 1);
        assert!(ds.has_errors());
        assert_eq!(ds.first_error(), Some("boom"));
        assert_eq!(ds.rows[0].location(), UNKNOWN_IDENTITY);
        assert_eq!(ds.rows[0].brand(), None);
    }

    #[test]
    fn dataset_without_error_rows_has_no_errors() {
        let ds = SalesDataset::new(vec![sales_row("1", 100.0), sales_row("2", 55.5)]);
        assert!(!ds.has_errors());
        assert_eq!(ds.first_error(), None);
    }

    #[test]
    fn refresh_line_includes_row_count() {
        let ds = SalesDataset::new(vec![sales_row("1", 1.0)]);
        assert!(ds.refresh_line().ends_with("| Data for 1 locations"));
    }

    #[test]
    fn sales_row_serde_round_trip_preserves_variant() {
        let row = sales_row("7", 42.0);
        let json = serde_json::to_string(&row).expect("serialize");
        assert!(json.contains("\"kind\":\"sales\""));
        let back: SalesRow = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);

        let err = SalesRow::Error(ErrorRecord::sentinel("timeout"));
        let json = serde_json::to_string(&err).expect("serialize");
        assert!(json.contains("\"kind\":\"error\""));
        let back: SalesRow = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, err);
    }

    #[test]
    fn alert_display_formats() {
        let alert = AlertEntry::OverShort {
            location: "FG - TOR1".to_string(),
            amount: -45.0,
        };
        assert_eq!(alert.to_string(), "FG - TOR1: Over/Short $-45.00");
        let all_clear = AlertEntry::AllClear { threshold: 30.0 };
        assert_eq!(all_clear.to_string(), "No Over/Short alerts (\u{b1}$30)");
    }
}
