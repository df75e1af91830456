//! Collaborators the recent access pipeline reads from.
//!
//! `Database` implements all of them; tests substitute in-memory fakes.

use std::{collections::HashSet, future::Future};

use anyhow::Result;

use crate::models::{AccessLogEntry, AppMetadata};

pub trait AccessLogSource: Send + Sync {
    /// Every access log entry for the current user, newest first.
    fn access_logs(&self) -> impl Future<Output = Result<Vec<AccessLogEntry>>> + Send;
}

pub trait AppInfoReader: Send + Sync {
    fn app_metadata(&self, package_name: &str) -> impl Future<Output = Result<AppMetadata>> + Send;

    fn is_package_installed(&self, package_name: &str) -> impl Future<Output = Result<bool>> + Send;
}

pub trait InactiveAppSource: Send + Sync {
    /// Packages that no longer hold write permission but still own data.
    fn inactive_packages(&self) -> impl Future<Output = Result<HashSet<String>>> + Send;
}
