use chrono::Duration;
use log::warn;

use crate::settings::RecentAccessSettings;

const DEFAULT_MAX_CLUSTER_DURATION_SECS: i64 = 10 * 60;
const DEFAULT_MAX_GAP_BETWEEN_LOGS_SECS: i64 = 60;

/// Time windows that decide whether two accesses belong to the same visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusteringConfig {
    /// Longest span between the newest and oldest access of one visit.
    pub max_cluster_duration: Duration,

    /// Longest silence between two consecutive accesses of one visit.
    pub max_gap_between_logs: Duration,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            max_cluster_duration: Duration::seconds(DEFAULT_MAX_CLUSTER_DURATION_SECS),
            max_gap_between_logs: Duration::seconds(DEFAULT_MAX_GAP_BETWEEN_LOGS_SECS),
        }
    }
}

impl From<&RecentAccessSettings> for ClusteringConfig {
    /// Windows chrono cannot represent fall back to their defaults.
    fn from(settings: &RecentAccessSettings) -> Self {
        Self {
            max_cluster_duration: window_from_secs(
                "max_cluster_duration_secs",
                settings.max_cluster_duration_secs,
                DEFAULT_MAX_CLUSTER_DURATION_SECS,
            ),
            max_gap_between_logs: window_from_secs(
                "max_gap_between_logs_secs",
                settings.max_gap_between_logs_secs,
                DEFAULT_MAX_GAP_BETWEEN_LOGS_SECS,
            ),
        }
    }
}

fn window_from_secs(name: &str, secs: u64, default_secs: i64) -> Duration {
    match i64::try_from(secs).ok().and_then(Duration::try_seconds) {
        Some(window) => window,
        None => {
            warn!("Ignoring out of range {name} = {secs}, using {default_secs}");
            Duration::seconds(default_secs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(duration_secs: u64, gap_secs: u64) -> RecentAccessSettings {
        RecentAccessSettings {
            max_cluster_duration_secs: duration_secs,
            max_gap_between_logs_secs: gap_secs,
            ..RecentAccessSettings::default()
        }
    }

    #[test]
    fn converts_seconds_to_windows() {
        let config = ClusteringConfig::from(&settings(1200, 90));
        assert_eq!(config.max_cluster_duration, Duration::minutes(20));
        assert_eq!(config.max_gap_between_logs, Duration::seconds(90));
    }

    #[test]
    fn out_of_range_windows_fall_back_to_defaults() {
        let defaults = ClusteringConfig::default();

        let config = ClusteringConfig::from(&settings(u64::MAX, 100_000_000_000_000_000));
        assert_eq!(config, defaults);

        let config = ClusteringConfig::from(&settings(i64::MAX as u64, 30));
        assert_eq!(config.max_cluster_duration, defaults.max_cluster_duration);
        assert_eq!(config.max_gap_between_logs, Duration::seconds(30));
    }

    #[test]
    fn largest_representable_window_is_kept() {
        let secs = i64::MAX / 1000;
        let config = ClusteringConfig::from(&settings(secs as u64, 0));
        assert_eq!(config.max_cluster_duration, Duration::seconds(secs));
        assert_eq!(config.max_gap_between_logs, Duration::zero());
    }
}
