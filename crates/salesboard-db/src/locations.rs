//! The one directory query: active locations from `T_LOCATION`.

use sqlx::PgPool;

use salesboard_core::Location;

/// Raw row shape returned by the directory query.
#[derive(Debug, Clone, sqlx::FromRow)]
struct LocationRow {
    location_name: String,
    location_code: String,
}

/// Fetch all active locations and derive each one's brand from its name.
///
/// `Ok(vec![])` means the query succeeded and the directory has no active
/// locations — callers must not conflate that with a failed query, which
/// surfaces as `Err`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the directory source is unreachable or the
/// query fails.
pub async fn list_active_locations(pool: &PgPool) -> Result<Vec<Location>, sqlx::Error> {
    let rows = sqlx::query_as::<_, LocationRow>(
        "SELECT LOCATION_NAME, LOCATION_CODE FROM T_LOCATION WHERE LOCATION_ACTIVE = 'Y'",
    )
    .fetch_all(pool)
    .await?;

    tracing::debug!(count = rows.len(), "retrieved active locations");

    Ok(rows
        .into_iter()
        .map(|r| Location::new(r.location_code, r.location_name))
        .collect())
}
