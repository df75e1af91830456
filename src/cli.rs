use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use clap::{Parser, ValueEnum};

use crate::models::Visit;

/// Longest retention accepted by `--prune-days`, roughly a century.
const MAX_PRUNE_DAYS: i64 = 36_500;

#[derive(Parser, Debug)]
#[command(name = "hc-recent-access", version, about = "Show which apps recently accessed health data")]
pub struct Args {
    /// SQLite store holding access logs and app state.
    #[arg(long, default_value = "./data/health-access.sqlite3")]
    pub db: PathBuf,

    /// JSON settings file. Missing files fall back to defaults.
    #[arg(long, default_value = "./data/settings.json")]
    pub settings: PathBuf,

    /// Maximum number of visits to print. Defaults to the dashboard size.
    #[arg(long, conflicts_with = "all")]
    pub limit: Option<usize>,

    /// Print every visit instead of the dashboard preview.
    #[arg(long)]
    pub all: bool,

    /// How to print the result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Delete access logs older than this many days before loading.
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=MAX_PRUNE_DAYS))]
    pub prune_days: Option<i64>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// The published state as pretty JSON.
    Json,
    /// One line per visit, as the recent access list shows it.
    Text,
}

impl Args {
    pub fn max_results(&self, dashboard_max_entries: usize) -> Option<usize> {
        if self.all {
            None
        } else {
            Some(self.limit.unwrap_or(dashboard_max_entries))
        }
    }

    /// Oldest access time kept by `--prune-days`, if pruning was asked for.
    pub fn prune_cutoff(&self, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
        let Some(days) = self.prune_days else {
            return Ok(None);
        };
        Duration::try_days(days)
            .and_then(|retention| now.checked_sub_signed(retention))
            .map(Some)
            .ok_or_else(|| anyhow!("--prune-days {days} is out of range"))
    }
}

/// Renders visits one per line: time, app, then what was read and written.
pub fn render_visits(visits: &[Visit], zone: FixedOffset) -> String {
    if visits.is_empty() {
        return "No recent access".to_string();
    }

    visits
        .iter()
        .map(|visit| {
            let mut line = format!("{}  {}", visit.time_label(zone), visit.app.app_name);
            if visit.is_inactive {
                line.push_str(" (inactive)");
            }
            if !visit.data_types_read.is_empty() {
                line.push_str(&format!("  read: {}", visit.read_summary()));
            }
            if !visit.data_types_written.is_empty() {
                line.push_str(&format!("  wrote: {}", visit.written_summary()));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
