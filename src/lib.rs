pub mod cli;
pub mod clustering;
pub mod db;
pub mod models;
pub mod recent_access;
pub mod settings;
pub mod sources;
pub mod time_source;
mod utils;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use tokio_util::sync::CancellationToken;

use clustering::ClusteringConfig;
use db::Database;
use recent_access::{RecentAccessController, RecentAccessLoader};
use settings::SettingsStore;
use time_source::{SystemTimeSource, TimeSource};

pub async fn run(args: cli::Args) -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let settings = SettingsStore::new(args.settings.clone())?;
    let recent_access = settings.recent_access();

    let database = Database::new(args.db.clone())?;

    if let Some(cutoff) = args.prune_cutoff(Utc::now())? {
        let removed = database.delete_access_logs_before(cutoff).await?;
        info!("Pruned {removed} access log entries older than {cutoff}");
    }

    let loader = RecentAccessLoader::with_database(
        database,
        ClusteringConfig::from(&recent_access),
        Arc::new(SystemTimeSource),
    );
    let controller = RecentAccessController::new(loader);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let count = controller
        .refresh(args.max_results(recent_access.dashboard_max_entries), &cancel)
        .await?;
    info!("Loaded {count} recent access entries");

    let state = controller.current();
    let rendered = match args.format {
        cli::OutputFormat::Json => serde_json::to_string_pretty(&state)
            .context("failed to render recent access")?,
        cli::OutputFormat::Text => cli::render_visits(
            state.visits().unwrap_or_default(),
            SystemTimeSource.device_zone(),
        ),
    };
    println!("{rendered}");

    Ok(())
}
