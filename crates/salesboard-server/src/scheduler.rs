//! Background refresh scheduler.
//!
//! Registers the periodic data-refresh job at server startup. Each tick
//! runs one full cycle, which repopulates the cache; a tick that finds a
//! still-warm cache is effectively a no-op.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use salesboard_engine::RefreshEngine;

/// Builds and starts the scheduler with the data-refresh job registered.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the cron expression is invalid, or the scheduler fails to start.
pub async fn build_scheduler(
    engine: Arc<RefreshEngine>,
    refresh_cron: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(refresh_cron, move |_uuid, _lock| {
        let engine = Arc::clone(&engine);

        Box::pin(async move {
            tracing::info!("scheduler: starting refresh cycle");
            let today = chrono::Utc::now().date_naive();
            let dataset = engine.run_cycle(today).await;
            if let Some(error) = dataset.first_error() {
                tracing::warn!(error, "scheduler: refresh cycle degraded to sentinel");
            } else {
                tracing::info!(rows = dataset.len(), "scheduler: refresh cycle complete");
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    Ok(scheduler)
}
