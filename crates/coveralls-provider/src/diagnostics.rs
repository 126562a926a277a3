//! Structured diagnostics handed back to the orchestrator.

use serde::Serialize;

use crate::config::ConfigError;
use crate::error::{Operation, ReconcileError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

fn verb(operation: Operation) -> &'static str {
    match operation {
        Operation::Create => "create",
        Operation::Update => "update",
        Operation::Delete => "delete",
        Operation::Read | Operation::Import | Operation::Lookup => "read",
    }
}

fn summary(operation: Operation) -> &'static str {
    match operation {
        Operation::Create => "Error creating repository",
        Operation::Update => "Error updating repository",
        Operation::Delete => "Error deleting repository",
        Operation::Read | Operation::Import | Operation::Lookup => "Error reading repository",
    }
}

impl From<&ReconcileError> for Diagnostic {
    fn from(err: &ReconcileError) -> Self {
        match err {
            ReconcileError::Client {
                operation, source, ..
            } => Diagnostic::error(
                summary(*operation),
                format!(
                    "Could not {} repository, unexpected error: {source}",
                    verb(*operation)
                ),
            ),
            ReconcileError::CreatedButUnreadable { id, source, .. } => Diagnostic::error(
                "Error reading repository",
                format!(
                    "Could not read repository after creating it, unexpected error: {source}. \
                     The repository exists in Coveralls; import it with id \"{id}\" to manage it."
                ),
            ),
            ReconcileError::MalformedIdentifier { source, .. } => {
                Diagnostic::error("Invalid repository identifier", source.to_string())
            }
            ReconcileError::Cancelled { operation, id } => Diagnostic::error(
                summary(*operation),
                format!("The {operation} of repository {id} was cancelled before it completed."),
            ),
        }
    }
}

impl From<&ConfigError> for Diagnostic {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::MissingToken => Diagnostic::error("Missing Coveralls API token", err.to_string()),
            _ => Diagnostic::error("Error creating Coveralls client", err.to_string()),
        }
    }
}
