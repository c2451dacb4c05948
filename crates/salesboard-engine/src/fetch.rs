//! Concurrent fan-out of per-location fetches.

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use futures::FutureExt;

use salesboard_core::{Location, SalesRow};
use salesboard_salesmix::SalesMixClient;

/// Fetches every location's sales for `date` through a bounded worker pool.
///
/// Dispatches one task per location, at most `concurrency` in flight, and
/// waits for all of them — there is no partial-result short-circuiting.
/// Because [`SalesMixClient::fetch_one`] never fails, the result always
/// holds exactly one row per location, in completion order. Downstream
/// sorts and groups explicitly, so order here is not significant.
pub async fn fetch_all(
    client: &SalesMixClient,
    locations: &[Location],
    date: NaiveDate,
    concurrency: usize,
) -> Vec<SalesRow> {
    let concurrency = concurrency.max(1);

    let fetches: Vec<_> = locations
        .iter()
        .map(|location| client.fetch_one(location, date).boxed())
        .collect();
    let rows: Vec<SalesRow> = stream::iter(fetches)
        .buffer_unordered(concurrency)
        .collect()
        .await;

    tracing::debug!(
        requested = locations.len(),
        returned = rows.len(),
        "per-location fetch fan-out complete"
    );

    rows
}
