use std::fmt;

use coveralls_client::ClientError;
use coveralls_core::{ErrorCategory, IdError};
use thiserror::Error;

/// Lifecycle operation an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
    /// Data source read by service and name.
    Lookup,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Read => write!(f, "read"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::Import => write!(f, "import"),
            Self::Lookup => write!(f, "lookup"),
        }
    }
}

/// A failed lifecycle operation, annotated with what was being done to which
/// repository.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("{operation} of repository {id} failed: {source}")]
    Client {
        operation: Operation,
        id: String,
        #[source]
        source: ClientError,
    },

    /// The create call succeeded but the mandatory read-back did not. The
    /// repository exists remotely and can be recovered by importing `id`.
    #[error("repository {id} was created but reading it back failed: {source}")]
    CreatedButUnreadable {
        service: String,
        name: String,
        id: String,
        #[source]
        source: ClientError,
    },

    #[error("{operation} failed: {source}")]
    MalformedIdentifier {
        operation: Operation,
        #[source]
        source: IdError,
    },

    #[error("{operation} of repository {id} was cancelled")]
    Cancelled { operation: Operation, id: String },
}

impl ReconcileError {
    pub(crate) fn malformed(operation: Operation) -> impl FnOnce(IdError) -> Self {
        move |source| Self::MalformedIdentifier { operation, source }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::Client { operation, .. }
            | Self::MalformedIdentifier { operation, .. }
            | Self::Cancelled { operation, .. } => *operation,
            Self::CreatedButUnreadable { .. } => Operation::Create,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Client { source, .. } | Self::CreatedButUnreadable { source, .. } => {
                source.category()
            }
            Self::MalformedIdentifier { .. } => ErrorCategory::MalformedIdentifier,
            Self::Cancelled { .. } => ErrorCategory::Cancelled,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }
}

pub type ReconcileResult<T> = std::result::Result<T, ReconcileError>;
