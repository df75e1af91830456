use chrono::{DateTime, Utc};

use crate::{
    clustering::config::ClusteringConfig,
    models::{AccessLogEntry, AppMetadata, Visit},
    time_source::TimeSource,
};

/// An open visit for one package while the log is being walked.
///
/// Entries arrive newest first, so `latest_time` is fixed when the cluster
/// opens and `earliest_time` moves back with every absorbed entry.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub latest_time: DateTime<Utc>,
    pub earliest_time: DateTime<Utc>,
    pub visit: Visit,
}

impl Cluster {
    pub fn open(entry: &AccessLogEntry, app: AppMetadata, time_source: &dyn TimeSource) -> Self {
        let visit = Visit::new(app, entry.access_time, time_source.is_today(entry.access_time));
        let mut cluster = Self {
            latest_time: entry.access_time,
            earliest_time: entry.access_time,
            visit,
        };
        cluster.absorb(entry);
        cluster
    }

    /// Whether `entry` continues this burst: the whole visit stays inside the
    /// duration window and no gap exceeds the gap window. Both bounds are
    /// inclusive.
    pub fn accepts(&self, entry: &AccessLogEntry, config: &ClusteringConfig) -> bool {
        self.can_reach(entry.access_time, config)
    }

    /// Whether any entry at or before `time` could still be absorbed.
    pub fn can_reach(&self, time: DateTime<Utc>, config: &ClusteringConfig) -> bool {
        self.latest_time - time <= config.max_cluster_duration
            && self.earliest_time - time <= config.max_gap_between_logs
    }

    pub fn absorb(&mut self, entry: &AccessLogEntry) {
        self.earliest_time = entry.access_time;
        self.visit.record_access(
            entry.operation_type,
            entry.data_types.iter().map(|data_type| data_type.category()),
        );
    }

    pub fn into_visit(self) -> Visit {
        self.visit
    }
}
