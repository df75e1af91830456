use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecentAccessError {
    /// The access log or the inactive app list could not be read.
    #[error("failed to load recent access: {0:#}")]
    LoadFailed(anyhow::Error),

    #[error("failed to resolve app details: {0:#}")]
    ResolveFailed(anyhow::Error),

    #[error("recent access load was cancelled")]
    Cancelled,
}
