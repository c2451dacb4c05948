mod api;
mod scheduler;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use salesboard_cache::SnapshotCache;
use salesboard_engine::RefreshEngine;
use salesboard_salesmix::{ApiCredentials, SalesMixClient};

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = salesboard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = salesboard_db::PoolConfig::from_app_config(&config);
    let pool = salesboard_db::connect_pool(&config.database_url, pool_config).await?;

    let client = SalesMixClient::new(
        &config.api_base_url,
        ApiCredentials::from_config(&config),
        config.request_timeout_secs,
    )?;
    let cache = SnapshotCache::from_config(config.redis_url.as_deref()).await?;
    tracing::info!(backend = cache.backend_name(), "cache backend selected");

    let engine = Arc::new(RefreshEngine::new(
        pool.clone(),
        client,
        Arc::new(cache),
        &config,
    ));

    // Warm the cache in the background so the first dashboard request does
    // not pay for a full fetch cycle.
    let warm_engine = Arc::clone(&engine);
    tokio::spawn(async move {
        let today = chrono::Utc::now().date_naive();
        let dataset = warm_engine.run_cycle(today).await;
        tracing::info!(rows = dataset.len(), "startup refresh cycle complete");
    });

    let _scheduler = scheduler::build_scheduler(Arc::clone(&engine), &config.refresh_cron).await?;

    let app = build_app(AppState { pool, engine });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "salesboard server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
