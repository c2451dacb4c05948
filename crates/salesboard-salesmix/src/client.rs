use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Url};

use salesboard_core::{AppConfig, ErrorRecord, Location, SalesRecord, SalesRow};

use crate::error::SalesMixError;
use crate::types::{parse_transaction_date, SalesMixItem};
use crate::format_transaction_date;

/// Header credentials for the sales-mix API.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub token: String,
    pub password: String,
    pub sitename: String,
    pub userid: String,
}

impl ApiCredentials {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            token: config.api_token.clone(),
            password: config.api_password.clone(),
            sitename: config.api_sitename.clone(),
            userid: config.api_userid.clone(),
        }
    }
}

/// Client for the remote sales-mix API.
///
/// Manages the HTTP client, base URL, and credential headers. Use
/// [`SalesMixClient::new`] with the production base URL, or point it at a
/// mock server in tests.
pub struct SalesMixClient {
    client: Client,
    base_url: Url,
    credentials: ApiCredentials,
}

impl SalesMixClient {
    /// Creates a new client with explicit request and connect timeouts.
    ///
    /// The request timeout bounds every per-location call so one slow
    /// location cannot stall a whole refresh cycle.
    ///
    /// # Errors
    ///
    /// Returns [`SalesMixError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SalesMixError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        base_url: &str,
        credentials: ApiCredentials,
        timeout_secs: u64,
    ) -> Result<Self, SalesMixError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("salesboard/0.1")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends the endpoint path instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| SalesMixError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Fetches and normalizes one location's sales for `date`.
    ///
    /// The API returns one header entry per POS; numeric fields are summed
    /// across entries so the caller always gets exactly one record per
    /// location. The display name falls back to the directory name when the
    /// API omits it.
    ///
    /// # Errors
    ///
    /// - [`SalesMixError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`SalesMixError::Deserialize`] if the body is not the expected JSON shape.
    /// - [`SalesMixError::EmptyResponse`] if the API returns an empty array.
    pub async fn fetch_sales(
        &self,
        location: &Location,
        date: NaiveDate,
    ) -> Result<SalesRecord, SalesMixError> {
        let url = self.build_url(&location.code, date)?;

        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .header("authenticationtoken", &self.credentials.token)
            .header("password", &self.credentials.password)
            .header("sitename", &self.credentials.sitename)
            .header("userid", &self.credentials.userid)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let items: Vec<SalesMixItem> =
            serde_json::from_str(&body).map_err(|e| SalesMixError::Deserialize {
                context: format!("getAllSalesMix(locationCode={})", location.code),
                source: e,
            })?;

        if items.is_empty() {
            return Err(SalesMixError::EmptyResponse {
                location_code: location.code.clone(),
            });
        }

        let mut record = SalesRecord {
            location: location.name.clone(),
            location_code: location.code.clone(),
            brand: location.brand,
            transaction_date: None,
            charged_tips: 0.0,
            ending_count: 0,
            total_net_sales: 0.0,
            paid_outs: 0.0,
            book_cash: 0.0,
            over_short: 0.0,
        };

        for item in &items {
            let h = &item.header;
            record.charged_tips += h.charged_tips;
            record.ending_count += h.ending_count;
            record.total_net_sales += h.total_net_sales;
            record.paid_outs += h.paid_outs;
            record.book_cash += h.book_cash;
            record.over_short += h.over_short;
        }

        let first = &items[0].header;
        if let Some(name) = &first.location {
            record.location.clone_from(name);
        }
        record.transaction_date = parse_transaction_date(first.transaction_date.as_deref());

        Ok(record)
    }

    /// The per-location firewall: fetch one location, never fail.
    ///
    /// Any [`SalesMixError`] is logged and converted into an error sentinel
    /// row carrying the known identity fields, so a failed location degrades
    /// to one `Error` row instead of aborting the batch.
    pub async fn fetch_one(&self, location: &Location, date: NaiveDate) -> SalesRow {
        match self.fetch_sales(location, date).await {
            Ok(record) => SalesRow::Sales(record),
            Err(e) => {
                let message = error_chain(&e);
                tracing::warn!(
                    location_code = %location.code,
                    error = %message,
                    "sales fetch failed; continuing with error row"
                );
                SalesRow::Error(ErrorRecord {
                    error: message,
                    location: location.name.clone(),
                    location_code: location.code.clone(),
                    brand: Some(location.brand),
                })
            }
        }
    }

    /// Builds the full endpoint URL with percent-encoded query parameters.
    fn build_url(&self, location_code: &str, date: NaiveDate) -> Result<Url, SalesMixError> {
        let mut url = self
            .base_url
            .join("salesmix/v1/getAllSalesMix")
            .map_err(|_| SalesMixError::InvalidBaseUrl(self.base_url.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("includeDetails", "true");
            pairs.append_pair("locationCode", location_code);
            pairs.append_pair("posNumber", "POS");
            pairs.append_pair("transactionDate", &format_transaction_date(date));
        }
        Ok(url)
    }
}

/// Flattens an error and its source chain into one sentinel message, so the
/// underlying cause (e.g. "operation timed out") survives into the error
/// row instead of being hidden behind a generic wrapper.
fn error_chain(error: &SalesMixError) -> String {
    use std::error::Error as _;

    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> ApiCredentials {
        ApiCredentials {
            token: "test-token".to_string(),
            password: "test-password".to_string(),
            sitename: "fivestar".to_string(),
            userid: "dashboard".to_string(),
        }
    }

    fn test_client(base_url: &str) -> SalesMixClient {
        SalesMixClient::new(base_url, test_credentials(), 5)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://webservices.net-chef.com");
        let date = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let url = client.build_url("1001", date).unwrap();
        assert_eq!(
            url.as_str(),
            "https://webservices.net-chef.com/salesmix/v1/getAllSalesMix\
             ?includeDetails=true&locationCode=1001&posNumber=POS&transactionDate=28-Aug-26"
        );
    }

    #[test]
    fn build_url_strips_trailing_slash() {
        let client = test_client("https://webservices.net-chef.com/");
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let url = client.build_url("42", date).unwrap();
        assert!(url
            .as_str()
            .starts_with("https://webservices.net-chef.com/salesmix/v1/getAllSalesMix?"));
        assert!(url.as_str().contains("transactionDate=02-Jan-26"));
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://webservices.net-chef.com");
        let date = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let url = client.build_url("FG - OR1", date).unwrap();
        assert!(
            url.as_str().contains("locationCode=FG+-+OR1")
                || url.as_str().contains("locationCode=FG%20-%20OR1"),
            "location code should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = SalesMixClient::new("not a url", test_credentials(), 5);
        assert!(matches!(result, Err(SalesMixError::InvalidBaseUrl(_))));
    }
}
