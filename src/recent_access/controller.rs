use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{
    recent_access::{
        error::RecentAccessError, loader::RecentAccessLoader, state::RecentAccessState,
    },
    sources::{AccessLogSource, AppInfoReader, InactiveAppSource},
};

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info};

/// Publishes the recent access list to whoever renders it.
///
/// Every refresh runs with its own working state; only the published
/// [`RecentAccessState`] and the last settled outcome are shared.
pub struct RecentAccessController<S, A, I> {
    loader: Arc<RecentAccessLoader<S, A, I>>,
    state: watch::Sender<RecentAccessState>,
    /// Last data or failure published, restored when a refresh is cancelled.
    settled: Arc<Mutex<RecentAccessState>>,
}

impl<S, A, I> Clone for RecentAccessController<S, A, I> {
    fn clone(&self) -> Self {
        Self {
            loader: Arc::clone(&self.loader),
            state: self.state.clone(),
            settled: Arc::clone(&self.settled),
        }
    }
}

impl<S, A, I> RecentAccessController<S, A, I>
where
    S: AccessLogSource,
    A: AppInfoReader,
    I: InactiveAppSource,
{
    pub fn new(loader: RecentAccessLoader<S, A, I>) -> Self {
        let (state, _) = watch::channel(RecentAccessState::Loading);
        Self {
            loader: Arc::new(loader),
            state,
            settled: Arc::new(Mutex::new(RecentAccessState::Loading)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RecentAccessState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> RecentAccessState {
        self.state.borrow().clone()
    }

    /// Reload and publish. A cancelled refresh publishes nothing; if the
    /// list is still loading it goes back to the last settled outcome.
    pub async fn refresh(
        &self,
        max_results: Option<usize>,
        cancel: &CancellationToken,
    ) -> Result<usize, RecentAccessError> {
        self.state.send_replace(RecentAccessState::Loading);

        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                log_info!("recent access refresh cancelled");
                let settled = self.lock_settled().clone();
                self.state.send_if_modified(|state| {
                    if *state == RecentAccessState::Loading {
                        *state = settled;
                        true
                    } else {
                        false
                    }
                });
                Err(RecentAccessError::Cancelled)
            }
            result = self.loader.load(max_results) => match result {
                Ok(visits) => {
                    let count = visits.len();
                    self.settle(RecentAccessState::WithData(visits));
                    Ok(count)
                }
                Err(err) => {
                    log_error!("recent access refresh failed: {err}");
                    self.settle(RecentAccessState::LoadFailed(err.to_string()));
                    Err(err)
                }
            },
        }
    }

    fn settle(&self, outcome: RecentAccessState) {
        *self.lock_settled() = outcome.clone();
        self.state.send_replace(outcome);
    }

    fn lock_settled(&self) -> MutexGuard<'_, RecentAccessState> {
        self.settled.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
