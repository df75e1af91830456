use serde::Serialize;

use crate::models::Visit;

/// What the recent access list currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "camelCase")]
pub enum RecentAccessState {
    Loading,
    LoadFailed(String),
    WithData(Vec<Visit>),
}

impl RecentAccessState {
    pub fn visits(&self) -> Option<&[Visit]> {
        match self {
            RecentAccessState::WithData(visits) => Some(visits),
            _ => None,
        }
    }
}
