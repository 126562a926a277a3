use std::fmt;

use serde::{Deserialize, Serialize};

/// A repository as the Coveralls API represents it.
///
/// `token` is only populated by a get; create and update responses omit it.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteRepository {
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

impl fmt::Debug for RemoteRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteRepository")
            .field("service", &self.service)
            .field("name", &self.name)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("comment_on_pull_requests", &self.comment_on_pull_requests)
            .field("send_build_status", &self.send_build_status)
            .field("commit_status_fail_threshold", &self.commit_status_fail_threshold)
            .field(
                "commit_status_fail_change_threshold",
                &self.commit_status_fail_change_threshold,
            )
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// The writable subset of a repository sent on create and update.
///
/// `service` and `name` are only set for create; on update the key is part of
/// the URL and the fields are left out of the body entirely. Unset thresholds
/// are sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub comment_on_pull_requests: bool,

    pub send_build_status: bool,

    pub commit_status_fail_threshold: Option<f64>,

    pub commit_status_fail_change_threshold: Option<f64>,
}

/// `{ "repo": ... }` wrapper used by create and update requests and responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoEnvelope<T> {
    pub repo: T,
}

impl<T> RepoEnvelope<T> {
    pub fn new(repo: T) -> Self {
        Self { repo }
    }

    pub fn into_inner(self) -> T {
        self.repo
    }
}
