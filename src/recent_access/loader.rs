use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{
    clustering::{cluster_access_logs, ClusteringConfig},
    db::Database,
    models::Visit,
    recent_access::error::RecentAccessError,
    sources::{AccessLogSource, AppInfoReader, InactiveAppSource},
    time_source::TimeSource,
};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_warn};

/// Loads the access log and turns it into the visits shown to the user.
///
/// Visits of apps that are neither installed nor inactive are dropped after
/// clustering, so a bounded load may return fewer than `max_results` rows.
pub struct RecentAccessLoader<S, A, I> {
    logs: S,
    apps: A,
    inactive: I,
    config: ClusteringConfig,
    time_source: Arc<dyn TimeSource>,
}

impl RecentAccessLoader<Database, Database, Database> {
    pub fn with_database(
        db: Database,
        config: ClusteringConfig,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        Self::new(db.clone(), db.clone(), db, config, time_source)
    }
}

impl<S, A, I> RecentAccessLoader<S, A, I>
where
    S: AccessLogSource,
    A: AppInfoReader,
    I: InactiveAppSource,
{
    pub fn new(
        logs: S,
        apps: A,
        inactive: I,
        config: ClusteringConfig,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            logs,
            apps,
            inactive,
            config,
            time_source,
        }
    }

    pub async fn load(&self, max_results: Option<usize>) -> Result<Vec<Visit>, RecentAccessError> {
        let logs = self
            .logs
            .access_logs()
            .await
            .map_err(RecentAccessError::LoadFailed)?;

        let visits = cluster_access_logs(
            &logs,
            max_results,
            &self.config,
            self.time_source.as_ref(),
            &self.apps,
        )
        .await
        .map_err(RecentAccessError::ResolveFailed)?;

        let inactive = self
            .inactive
            .inactive_packages()
            .await
            .map_err(RecentAccessError::LoadFailed)?;

        let visits = self.visible_visits(visits, &inactive).await?;

        log_debug!(
            "loaded {} recent access visits ({} inactive)",
            visits.len(),
            visits.iter().filter(|visit| visit.is_inactive).count()
        );

        Ok(visits)
    }

    /// Flags inactive apps and drops visits of apps that are gone for good.
    async fn visible_visits(
        &self,
        visits: Vec<Visit>,
        inactive: &HashSet<String>,
    ) -> Result<Vec<Visit>, RecentAccessError> {
        let mut installed: HashMap<String, bool> = HashMap::new();
        let mut shown = Vec::with_capacity(visits.len());

        for mut visit in visits {
            visit.is_inactive = inactive.contains(visit.package_name());
            if visit.is_inactive {
                shown.push(visit);
                continue;
            }

            let is_installed = match installed.get(visit.package_name()) {
                Some(known) => *known,
                None => {
                    let known = self
                        .apps
                        .is_package_installed(visit.package_name())
                        .await
                        .map_err(RecentAccessError::ResolveFailed)?;
                    installed.insert(visit.package_name().to_string(), known);
                    known
                }
            };

            if is_installed {
                shown.push(visit);
            } else {
                log_warn!(
                    "hiding recent access by uninstalled app {}",
                    visit.package_name()
                );
            }
        }

        Ok(shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{AccessLogEntry, DataType, OperationType},
        test_support::{FakeAppIndex, FakeInactiveApps, FakeLogSource},
        time_source::FixedTimeSource,
    };
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 4, 20, 0, 0).unwrap()
    }

    fn read(package: &str, minutes_ago: i64) -> AccessLogEntry {
        AccessLogEntry::new(
            package,
            now() - Duration::minutes(minutes_ago),
            OperationType::Read,
            [DataType::Weight],
        )
    }

    fn loader(
        logs: FakeLogSource,
        apps: FakeAppIndex,
        inactive: &[&str],
    ) -> RecentAccessLoader<FakeLogSource, FakeAppIndex, FakeInactiveApps> {
        RecentAccessLoader::new(
            logs,
            apps,
            FakeInactiveApps {
                packages: inactive.iter().map(|p| p.to_string()).collect(),
            },
            ClusteringConfig::default(),
            Arc::new(FixedTimeSource::utc(now())),
        )
    }

    #[tokio::test]
    async fn hides_uninstalled_apps_and_flags_inactive_ones() {
        let logs = FakeLogSource {
            logs: vec![read("gone", 1), read("dormant", 5), read("active", 30)],
            fail: false,
        };
        let apps = FakeAppIndex::default()
            .uninstalled("gone")
            .uninstalled("dormant");

        let visits = loader(logs, apps, &["dormant"]).load(None).await.unwrap();

        let packages: Vec<_> = visits.iter().map(|visit| visit.package_name()).collect();
        assert_eq!(packages, vec!["dormant", "active"]);
        assert!(visits[0].is_inactive);
        assert!(!visits[1].is_inactive);
    }

    #[tokio::test]
    async fn hidden_apps_are_dropped_after_the_limit_is_applied() {
        let logs = FakeLogSource {
            logs: vec![read("gone", 1), read("a", 20), read("gone", 40), read("b", 60)],
            fail: false,
        };
        let apps = FakeAppIndex::default().uninstalled("gone");

        let visits = loader(logs, apps, &[]).load(Some(2)).await.unwrap();

        let packages: Vec<_> = visits.iter().map(|visit| visit.package_name()).collect();
        assert_eq!(packages, vec!["a"]);
    }

    #[tokio::test]
    async fn source_failure_is_load_failed() {
        let logs = FakeLogSource {
            logs: Vec::new(),
            fail: true,
        };
        let result = loader(logs, FakeAppIndex::default(), &[]).load(None).await;
        assert!(matches!(result, Err(RecentAccessError::LoadFailed(_))));
    }

    #[tokio::test]
    async fn resolver_failure_is_resolve_failed() {
        let logs = FakeLogSource {
            logs: vec![read("broken", 1)],
            fail: false,
        };
        let apps = FakeAppIndex::default().failing_for("broken");

        let result = loader(logs, apps, &[]).load(None).await;
        assert!(matches!(result, Err(RecentAccessError::ResolveFailed(_))));
    }

    #[tokio::test]
    async fn loads_from_database() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("access.sqlite3")).unwrap();

        let mut fit = crate::db::AppRecord::new("com.example.fit");
        fit.app_name = Some("Fit".into());
        fit.holds_write_permission = true;
        db.upsert_app(&fit).await.unwrap();

        db.insert_access_logs(&[
            read("com.example.fit", 2),
            read("com.example.fit", 3),
            read("com.example.removed", 4),
        ])
        .await
        .unwrap();

        let loader = RecentAccessLoader::with_database(
            db,
            ClusteringConfig::default(),
            Arc::new(FixedTimeSource::utc(now())),
        );
        let visits = loader.load(None).await.unwrap();

        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].app.app_name, "Fit");
        assert_eq!(visits[0].instant_time, now() - Duration::minutes(2));
        assert_eq!(visits[0].read_summary(), "Body measurements");
    }
}
