use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
};

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::{
    clustering::{app_cache::AppMetadataCache, cluster::Cluster, config::ClusteringConfig},
    models::{AccessLogEntry, Visit},
    sources::AppInfoReader,
    time_source::TimeSource,
};

const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// Group a newest-first access log into per-app visits.
///
/// Entries of one package join the open visit of that package while the
/// visit spans at most `max_cluster_duration` and no gap exceeds
/// `max_gap_between_logs`; otherwise the open visit is closed and a new one
/// starts. Packages are tracked independently.
///
/// Visits come back newest first. With `max_results` set, only that many are
/// returned and the walk stops as soon as the remaining entries can no longer
/// change them. The order of `logs` is trusted, not checked.
pub async fn cluster_access_logs<R: AppInfoReader>(
    logs: &[AccessLogEntry],
    max_results: Option<usize>,
    config: &ClusteringConfig,
    time_source: &dyn TimeSource,
    resolver: &R,
) -> Result<Vec<Visit>> {
    if logs.is_empty() || max_results == Some(0) {
        return Ok(Vec::new());
    }

    let mut apps = AppMetadataCache::new(resolver);
    let mut open: HashMap<String, Cluster> = HashMap::new();
    let mut visits: Vec<Visit> = Vec::new();
    let mut newest = TopInstants::new(max_results);
    let mut consumed = 0;

    for entry in logs {
        consumed += 1;

        if let Some(cluster) = open.get_mut(&entry.package_name) {
            if cluster.accepts(entry, config) {
                cluster.absorb(entry);
                continue;
            }
        }

        let app = apps.get(&entry.package_name).await?;
        let fresh = Cluster::open(entry, app, time_source);
        let Some(closed) = open.insert(entry.package_name.clone(), fresh) else {
            continue;
        };

        let visit = closed.into_visit();
        newest.push(visit.instant_time);
        visits.push(visit);

        if newest.is_settled(entry.access_time, open.values(), config) {
            break;
        }
    }

    visits.extend(open.into_values().map(Cluster::into_visit));
    visits.sort_by(|a, b| {
        b.instant_time
            .cmp(&a.instant_time)
            .then_with(|| a.package_name().cmp(b.package_name()))
    });
    if let Some(limit) = max_results {
        visits.truncate(limit);
    }

    log_debug!(
        "clustered {consumed}/{} access log entries from {} apps into {} visits",
        logs.len(),
        apps.resolved_count(),
        visits.len()
    );

    Ok(visits)
}

/// The `limit` newest instants among closed visits.
struct TopInstants {
    limit: Option<usize>,
    heap: BinaryHeap<Reverse<DateTime<Utc>>>,
}

impl TopInstants {
    fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            heap: BinaryHeap::new(),
        }
    }

    fn push(&mut self, instant: DateTime<Utc>) {
        let Some(limit) = self.limit else {
            return;
        };
        self.heap.push(Reverse(instant));
        if self.heap.len() > limit {
            self.heap.pop();
        }
    }

    /// True once no entry at or before `current` can alter the top visits.
    ///
    /// Requires `limit` closed visits strictly newer than `current` (so any
    /// visit opened later ranks below them) and every open cluster that could
    /// still rank to be out of reach of older entries.
    fn is_settled<'c>(
        &self,
        current: DateTime<Utc>,
        mut open: impl Iterator<Item = &'c Cluster>,
        config: &ClusteringConfig,
    ) -> bool {
        let Some(limit) = self.limit else {
            return false;
        };
        if self.heap.len() < limit {
            return false;
        }
        let Some(Reverse(threshold)) = self.heap.peek().copied() else {
            return false;
        };
        if current >= threshold {
            return false;
        }

        open.all(|cluster| cluster.latest_time < threshold || !cluster.can_reach(current, config))
    }
}
