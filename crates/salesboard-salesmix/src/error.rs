use thiserror::Error;

/// Errors returned by the sales-mix API client.
#[derive(Debug, Error)]
pub enum SalesMixError {
    /// Network or TLS failure from the underlying HTTP client, including
    /// request timeouts and non-2xx statuses surfaced via `error_for_status`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered 2xx but returned no sales-mix entries.
    #[error("empty sales-mix response for location {location_code}")]
    EmptyResponse { location_code: String },
}
