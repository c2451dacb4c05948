//! Wire types for the `getAllSalesMix` endpoint.

use chrono::NaiveDate;
use serde::Deserialize;

/// One element of the top-level JSON array; the payload of interest is the
/// nested sales-header object.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesMixItem {
    #[serde(rename = "salesMixHeaderDetails")]
    pub header: SalesMixHeader,
}

/// The per-POS sales header. A missing numeric field is a deserialization
/// failure, which the fetch firewall converts into an error sentinel row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesMixHeader {
    /// Display name of the location; absent on some POS exports, in which
    /// case the directory name is used instead.
    pub location: Option<String>,
    pub transaction_date: Option<String>,
    pub charged_tips: f64,
    pub ending_count: i64,
    pub total_net_sales: f64,
    pub paid_outs: f64,
    pub book_cash: f64,
    pub over_short: f64,
}

/// Parses the transaction date formats the API has been observed to emit.
///
/// Unparseable or absent dates degrade to `None` rather than failing the
/// row; the date is informational on the dashboard.
#[must_use]
pub fn parse_transaction_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    const FORMATS: [&str; 3] = ["%d-%b-%y", "%Y-%m-%d", "%m/%d/%Y"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_transaction_date_api_format() {
        assert_eq!(
            parse_transaction_date(Some("28-Aug-26")),
            NaiveDate::from_ymd_opt(2026, 8, 28)
        );
    }

    #[test]
    fn parse_transaction_date_iso_format() {
        assert_eq!(
            parse_transaction_date(Some("2026-08-28")),
            NaiveDate::from_ymd_opt(2026, 8, 28)
        );
    }

    #[test]
    fn parse_transaction_date_garbage_is_none() {
        assert_eq!(parse_transaction_date(Some("not a date")), None);
        assert_eq!(parse_transaction_date(None), None);
    }

    #[test]
    fn header_deserializes_from_camel_case() {
        let json = r#"{
            "location": "FG - TOR1",
            "transactionDate": "28-Aug-26",
            "chargedTips": 12.5,
            "endingCount": 200,
            "totalNetSales": 4321.0,
            "paidOuts": 10.0,
            "bookCash": 400.0,
            "overShort": -5.25
        }"#;
        let header: SalesMixHeader = serde_json::from_str(json).expect("deserialize");
        assert_eq!(header.location.as_deref(), Some("FG - TOR1"));
        assert!((header.total_net_sales - 4321.0).abs() < f64::EPSILON);
        assert_eq!(header.ending_count, 200);
    }

    #[test]
    fn header_missing_numeric_field_is_an_error() {
        // No totalNetSales: must fail so the firewall produces a sentinel.
        let json = r#"{
            "chargedTips": 1.0,
            "endingCount": 1,
            "paidOuts": 0.0,
            "bookCash": 0.0,
            "overShort": 0.0
        }"#;
        assert!(serde_json::from_str::<SalesMixHeader>(json).is_err());
    }
}
