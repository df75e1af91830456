use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::{models::AppMetadata, sources::AppInfoReader};

/// Resolves each package at most once per clustering pass.
pub struct AppMetadataCache<'a, R> {
    reader: &'a R,
    resolved: HashMap<String, AppMetadata>,
}

impl<'a, R: AppInfoReader> AppMetadataCache<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self {
            reader,
            resolved: HashMap::new(),
        }
    }

    pub async fn get(&mut self, package_name: &str) -> Result<AppMetadata> {
        if let Some(app) = self.resolved.get(package_name) {
            return Ok(app.clone());
        }

        let app = self
            .reader
            .app_metadata(package_name)
            .await
            .with_context(|| format!("failed to resolve app metadata for {package_name}"))?;
        self.resolved.insert(package_name.to_string(), app.clone());
        Ok(app)
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }
}
