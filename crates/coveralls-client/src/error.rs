use coveralls_core::ErrorCategory;
use thiserror::Error;

/// Errors returned by [`CoverallsClient`](crate::CoverallsClient).
///
/// The client never logs and swallows a failure; every non-success exchange
/// comes back as one of these.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to reach Coveralls: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("repository not found: {service}/{name}")]
    NotFound { service: String, name: String },

    #[error("Coveralls API error (HTTP {status}): {body}")]
    Remote { status: u16, body: String },

    #[error("unexpected response format: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ClientError {
    pub fn not_found(service: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            service: service.into(),
            name: name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig(_) => ErrorCategory::Configuration,
            Self::Transport(_) => ErrorCategory::Transport,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Remote { .. } => ErrorCategory::Remote,
            Self::Decode(_) => ErrorCategory::Serialization,
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
