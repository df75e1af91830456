use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentAccessSettings {
    pub max_cluster_duration_secs: u64,
    pub max_gap_between_logs_secs: u64,
    /// Rows shown in the dashboard preview of recent access.
    pub dashboard_max_entries: usize,
}

impl Default for RecentAccessSettings {
    fn default() -> Self {
        Self {
            max_cluster_duration_secs: 10 * 60,
            max_gap_between_logs_secs: 60,
            dashboard_max_entries: 3,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct UserSettings {
    recent_access: RecentAccessSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!(
                    "Ignoring malformed settings at {}: {err}",
                    path.display()
                );
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn recent_access(&self) -> RecentAccessSettings {
        self.read().recent_access.clone()
    }

    pub fn update_recent_access(&self, settings: RecentAccessSettings) -> Result<()> {
        let mut guard = self.write();
        guard.recent_access = settings;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    fn read(&self) -> RwLockReadGuard<'_, UserSettings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserSettings> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::ClusteringConfig;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();

        assert_eq!(store.recent_access(), RecentAccessSettings::default());
        assert_eq!(
            ClusteringConfig::from(&store.recent_access()),
            ClusteringConfig::default()
        );
    }

    #[test]
    fn updates_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();

        let custom = RecentAccessSettings {
            max_cluster_duration_secs: 1200,
            max_gap_between_logs_secs: 90,
            dashboard_max_entries: 5,
        };
        store.update_recent_access(custom.clone()).unwrap();

        let reopened = SettingsStore::new(path).unwrap();
        assert_eq!(reopened.recent_access(), custom);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.recent_access(), RecentAccessSettings::default());
    }

    #[test]
    fn partial_file_keeps_missing_fields_at_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "recent_access": { "dashboard_max_entries": 7 } }"#).unwrap();

        let store = SettingsStore::new(path).unwrap();
        let settings = store.recent_access();
        assert_eq!(settings.dashboard_max_entries, 7);
        assert_eq!(settings.max_gap_between_logs_secs, 60);
    }
}
