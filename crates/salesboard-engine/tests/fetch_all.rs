//! Integration tests for the concurrent fetch orchestrator.
//!
//! Uses `wiremock` to simulate the sales-mix API per location code, so the
//! one-row-per-location property can be checked under partial failure,
//! total failure, and per-request timeout.

use std::collections::HashSet;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use salesboard_core::{Location, SalesRow};
use salesboard_engine::fetch_all;
use salesboard_salesmix::{ApiCredentials, SalesMixClient};

fn test_client(base_url: &str, timeout_secs: u64) -> SalesMixClient {
    let credentials = ApiCredentials {
        token: "test-token".to_string(),
        password: "test-password".to_string(),
        sitename: "fivestar".to_string(),
        userid: "dashboard".to_string(),
    };
    SalesMixClient::new(base_url, credentials, timeout_secs)
        .expect("failed to build test SalesMixClient")
}

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
}

fn sales_body(location: &str, net_sales: f64) -> serde_json::Value {
    json!([{
        "salesMixHeaderDetails": {
            "location": location,
            "transactionDate": "28-Aug-26",
            "chargedTips": 5.0,
            "endingCount": 50,
            "totalNetSales": net_sales,
            "paidOuts": 0.0,
            "bookCash": 100.0,
            "overShort": 1.0
        }
    }])
}

async fn mount_location(server: &MockServer, code: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/salesmix/v1/getAllSalesMix"))
        .and(query_param("locationCode", code))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_all_returns_one_row_per_location() {
    let server = MockServer::start().await;
    for code in ["1", "2", "3"] {
        mount_location(
            &server,
            code,
            ResponseTemplate::new(200).set_body_json(&sales_body("BZ01", 100.0)),
        )
        .await;
    }

    let locations = vec![
        Location::new("1", "BZ01"),
        Location::new("2", "BZ02"),
        Location::new("3", "BZ03"),
    ];
    let client = test_client(&server.uri(), 5);
    let rows = fetch_all(&client, &locations, test_date(), 10).await;

    assert_eq!(rows.len(), locations.len());
    let codes: HashSet<&str> = rows.iter().map(SalesRow::location_code).collect();
    assert_eq!(codes, HashSet::from(["1", "2", "3"]));
}

#[tokio::test]
async fn fetch_all_tolerates_partial_failure() {
    let server = MockServer::start().await;
    mount_location(
        &server,
        "1",
        ResponseTemplate::new(200).set_body_json(&sales_body("BZ01", 100.0)),
    )
    .await;
    mount_location(&server, "2", ResponseTemplate::new(500)).await;
    mount_location(
        &server,
        "3",
        ResponseTemplate::new(200).set_body_json(&sales_body("BZ03", 300.0)),
    )
    .await;

    let locations = vec![
        Location::new("1", "BZ01"),
        Location::new("2", "BZ02"),
        Location::new("3", "BZ03"),
    ];
    let client = test_client(&server.uri(), 5);
    let rows = fetch_all(&client, &locations, test_date(), 10).await;

    assert_eq!(rows.len(), 3);
    let error_rows: Vec<&SalesRow> = rows
        .iter()
        .filter(|r| matches!(r, SalesRow::Error(_)))
        .collect();
    assert_eq!(error_rows.len(), 1);
    assert_eq!(error_rows[0].location_code(), "2");
}

#[tokio::test]
async fn fetch_all_one_timeout_yields_exactly_one_error_row() {
    let server = MockServer::start().await;
    mount_location(
        &server,
        "1",
        ResponseTemplate::new(200).set_body_json(&sales_body("BZ01", 100.0)),
    )
    .await;
    // Stalls past the client's 1-second timeout.
    mount_location(
        &server,
        "2",
        ResponseTemplate::new(200)
            .set_body_json(&sales_body("BZ02", 200.0))
            .set_delay(Duration::from_secs(5)),
    )
    .await;
    mount_location(
        &server,
        "3",
        ResponseTemplate::new(200).set_body_json(&sales_body("BZ03", 300.0)),
    )
    .await;

    let locations = vec![
        Location::new("1", "BZ01"),
        Location::new("2", "BZ02"),
        Location::new("3", "BZ03"),
    ];
    let client = test_client(&server.uri(), 1);
    let rows = fetch_all(&client, &locations, test_date(), 10).await;

    assert_eq!(rows.len(), 3);
    let mut error_messages: Vec<&str> = rows.iter().filter_map(SalesRow::error_message).collect();
    assert_eq!(error_messages.len(), 1);
    let message = error_messages.pop().unwrap();
    assert!(
        message.contains("timed out"),
        "expected a timeout message, got: {message}"
    );
    let error_row = rows
        .iter()
        .find(|r| matches!(r, SalesRow::Error(_)))
        .unwrap();
    assert_eq!(error_row.location_code(), "2");
}

#[tokio::test]
async fn fetch_all_all_failures_still_returns_all_rows() {
    let server = MockServer::start().await;
    for code in ["1", "2"] {
        mount_location(&server, code, ResponseTemplate::new(503)).await;
    }

    let locations = vec![Location::new("1", "BZ01"), Location::new("2", "BZ02")];
    let client = test_client(&server.uri(), 5);
    let rows = fetch_all(&client, &locations, test_date(), 10).await;

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| matches!(r, SalesRow::Error(_))));
}

#[tokio::test]
async fn fetch_all_empty_location_list_returns_no_rows() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri(), 5);
    let rows = fetch_all(&client, &[], test_date(), 10).await;
    assert!(rows.is_empty());
}
