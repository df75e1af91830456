//! In-memory collaborators for unit tests.

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use anyhow::{anyhow, Result};

use crate::{
    models::{AccessLogEntry, AppMetadata},
    sources::{AccessLogSource, AppInfoReader, InactiveAppSource},
};

/// App index where every package is installed unless told otherwise.
#[derive(Default)]
pub struct FakeAppIndex {
    names: HashMap<String, String>,
    uninstalled: HashSet<String>,
    failing: HashSet<String>,
    metadata_calls: Mutex<HashMap<String, usize>>,
}

impl FakeAppIndex {
    pub fn with_app(mut self, package_name: &str, app_name: &str) -> Self {
        self.names
            .insert(package_name.to_string(), app_name.to_string());
        self
    }

    pub fn uninstalled(mut self, package_name: &str) -> Self {
        self.uninstalled.insert(package_name.to_string());
        self
    }

    pub fn failing_for(mut self, package_name: &str) -> Self {
        self.failing.insert(package_name.to_string());
        self
    }

    pub fn metadata_calls(&self, package_name: &str) -> usize {
        self.metadata_calls
            .lock()
            .unwrap()
            .get(package_name)
            .copied()
            .unwrap_or(0)
    }
}

impl AppInfoReader for FakeAppIndex {
    async fn app_metadata(&self, package_name: &str) -> Result<AppMetadata> {
        *self
            .metadata_calls
            .lock()
            .unwrap()
            .entry(package_name.to_string())
            .or_insert(0) += 1;

        if self.failing.contains(package_name) {
            return Err(anyhow!("package manager unavailable for {package_name}"));
        }

        Ok(match self.names.get(package_name) {
            Some(name) => AppMetadata {
                package_name: package_name.to_string(),
                app_name: name.clone(),
                icon_data_url: None,
            },
            None => AppMetadata::unknown(package_name),
        })
    }

    async fn is_package_installed(&self, package_name: &str) -> Result<bool> {
        Ok(!self.uninstalled.contains(package_name))
    }
}

/// Log source returning a fixed list, or failing on demand.
#[derive(Default)]
pub struct FakeLogSource {
    pub logs: Vec<AccessLogEntry>,
    pub fail: bool,
}

impl AccessLogSource for FakeLogSource {
    async fn access_logs(&self) -> Result<Vec<AccessLogEntry>> {
        if self.fail {
            return Err(anyhow!("health data service unavailable"));
        }
        Ok(self.logs.clone())
    }
}

#[derive(Default)]
pub struct FakeInactiveApps {
    pub packages: HashSet<String>,
}

impl InactiveAppSource for FakeInactiveApps {
    async fn inactive_packages(&self) -> Result<HashSet<String>> {
        Ok(self.packages.clone())
    }
}
