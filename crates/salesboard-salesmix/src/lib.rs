//! HTTP client for the remote sales-mix API.
//!
//! Wraps `reqwest` with header-based credential handling, typed response
//! deserialization, and the per-location firewall: [`SalesMixClient::fetch_one`]
//! never fails past its own boundary — every transport, status, or parse
//! problem is converted into an error sentinel row so a single location can
//! never abort a batch.

mod client;
mod error;
mod types;

pub use client::{ApiCredentials, SalesMixClient};
pub use error::SalesMixError;
pub use types::{SalesMixHeader, SalesMixItem};

/// Formats a date the way the sales-mix API expects it, e.g. `28-Aug-26`.
#[must_use]
pub fn format_transaction_date(date: chrono::NaiveDate) -> String {
    date.format("%d-%b-%y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn transaction_date_uses_day_month_abbrev_short_year() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        assert_eq!(format_transaction_date(date), "28-Aug-26");
    }

    #[test]
    fn transaction_date_zero_pads_day() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert_eq!(format_transaction_date(date), "02-Jan-26");
    }
}
