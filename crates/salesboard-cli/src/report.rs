//! Plain-text renderings of the pipeline's structured outputs.

use std::sync::Arc;

use chrono::NaiveDate;

use salesboard_cache::SnapshotCache;
use salesboard_core::SalesRecord;
use salesboard_engine::RefreshEngine;
use salesboard_salesmix::{ApiCredentials, SalesMixClient};

/// Print the active directory with each location's derived brand.
pub async fn print_locations() -> anyhow::Result<()> {
    let config = salesboard_core::load_app_config_from_env()?;
    let pool_config = salesboard_db::PoolConfig::from_app_config(&config);
    let pool = salesboard_db::connect_pool(&config.database_url, pool_config).await?;

    let locations = salesboard_db::list_active_locations(&pool).await?;
    if locations.is_empty() {
        println!("no active locations in directory");
        return Ok(());
    }

    println!("{:<12} {:<28} BRAND", "CODE", "NAME");
    for location in &locations {
        println!(
            "{:<12} {:<28} {}",
            location.code, location.name, location.brand
        );
    }
    println!("\n{} active locations", locations.len());
    Ok(())
}

/// Run one refresh cycle for `date` and print every consumer-facing view.
pub async fn print_snapshot(date: NaiveDate) -> anyhow::Result<()> {
    let config = salesboard_core::load_app_config_from_env()?;
    let pool_config = salesboard_db::PoolConfig::from_app_config(&config);
    let pool = salesboard_db::connect_pool(&config.database_url, pool_config).await?;
    let client = SalesMixClient::new(
        &config.api_base_url,
        ApiCredentials::from_config(&config),
        config.request_timeout_secs,
    )?;
    let cache = SnapshotCache::from_config(config.redis_url.as_deref()).await?;

    let engine = RefreshEngine::new(pool, client, Arc::new(cache), &config);
    let snapshot = engine.snapshot(date).await;

    if let Some(error) = &snapshot.error {
        println!("Error fetching data: {error}");
        return Ok(());
    }

    println!("{}\n", snapshot.refresh_line);

    println!("Brand Metrics");
    println!(
        "{:<20} {:>16} {:>12} {:>12}",
        "BRAND", "NET SALES", "CUSTOMERS", "TIPS"
    );
    for summary in &snapshot.brand_summaries {
        println!(
            "{:<20} {:>16.2} {:>12} {:>12.2}",
            summary.brand.to_string(),
            summary.total_net_sales,
            summary.total_customers,
            summary.total_tips
        );
    }

    print_ranking("Top 10 Locations by Sales", &snapshot.top_locations);
    print_ranking("Bottom 10 Locations by Sales", &snapshot.bottom_locations);

    println!("\nAlerts");
    for alert in &snapshot.alerts {
        println!("  {alert}");
    }

    Ok(())
}

fn print_ranking(title: &str, records: &[SalesRecord]) {
    println!("\n{title}");
    println!("{:<28} {:<20} {:>16}", "LOCATION", "BRAND", "NET SALES");
    for record in records {
        println!(
            "{:<28} {:<20} {:>16.2}",
            record.location,
            record.brand.to_string(),
            record.total_net_sales
        );
    }
}
