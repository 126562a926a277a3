use serde::{Deserialize, Serialize};

use crate::id::{IdError, RepositoryId};

/// Orchestrator-facing state of a managed Coveralls repository.
///
/// The same shape is used for desired state (plans) and observed state.
/// Computed attributes (`id`, `token`, timestamps) are `None` until the
/// remote repository has been read at least once. Optional thresholds stay
/// `None` when unset so "no threshold" is never confused with zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagedResourceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub service: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default)]
    pub comment_on_pull_requests: bool,

    #[serde(default)]
    pub send_build_status: bool,

    #[serde(default)]
    pub commit_status_fail_threshold: Option<f64>,

    #[serde(default)]
    pub commit_status_fail_change_threshold: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ManagedResourceRecord {
    /// Seed a record holding only an identifier, as import does.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Decode the persisted identifier into its lookup keys.
    pub fn repository_id(&self) -> Result<RepositoryId, IdError> {
        match self.id.as_deref() {
            Some(id) => id.parse(),
            None => Err(IdError::MissingSeparator(String::new())),
        }
    }
}
