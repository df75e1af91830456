use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::AppMetadata;

/// Stored state of an app known to the health data store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    pub package_name: String,
    pub app_name: Option<String>,
    pub icon_data_url: Option<String>,
    pub installed: bool,
    pub holds_write_permission: bool,
    pub has_health_data: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl AppRecord {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            app_name: None,
            icon_data_url: None,
            installed: true,
            holds_write_permission: false,
            has_health_data: false,
            updated_at: None,
        }
    }

    pub fn metadata(&self) -> AppMetadata {
        AppMetadata {
            package_name: self.package_name.clone(),
            app_name: self
                .app_name
                .clone()
                .unwrap_or_else(|| self.package_name.clone()),
            icon_data_url: self.icon_data_url.clone(),
        }
    }
}
