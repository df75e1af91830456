use serde::{Deserialize, Serialize};

/// Display identity of an app that touched health data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppMetadata {
    pub package_name: String,
    pub app_name: String,
    pub icon_data_url: Option<String>,
}

impl AppMetadata {
    /// Identity used when nothing is known about a package beyond its name.
    pub fn unknown(package_name: &str) -> Self {
        Self {
            package_name: package_name.to_string(),
            app_name: package_name.to_string(),
            icon_data_url: None,
        }
    }
}
