//! The `coveralls_repository` managed resource.
//!
//! Create and update responses never include the repository token, so both
//! are always followed by a get before a record is returned. Coveralls has no
//! delete endpoint: delete only drops the repository from state.

use std::future::Future;
use std::sync::Arc;

use coveralls_client::{ClientError, ClientResult, RemoteRepository, RepositoryApi};
use coveralls_core::{ManagedResourceRecord, RepositoryId};
use tokio_util::sync::CancellationToken;

use crate::diagnostics::Diagnostic;
use crate::error::{Operation, ReconcileError, ReconcileResult};
use crate::translate;

/// Resource type name as seen by the orchestrator.
pub const RESOURCE_TYPE_NAME: &str = "coveralls_repository";

/// Result of reading a managed repository.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Found(ManagedResourceRecord),
    /// The remote answered 404; the orchestrator should drop the record and
    /// plan re-creation.
    Absent { id: String, message: String },
}

impl ReadOutcome {
    pub fn into_record(self) -> Option<ManagedResourceRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::Absent { .. } => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent { .. })
    }
}

pub struct RepositoryResource {
    api: Arc<dyn RepositoryApi>,
}

impl RepositoryResource {
    pub fn new(api: Arc<dyn RepositoryApi>) -> Self {
        Self { api }
    }

    pub async fn create(
        &self,
        plan: &ManagedResourceRecord,
        cancel: &CancellationToken,
    ) -> ReconcileResult<ManagedResourceRecord> {
        let key = RepositoryId::new(plan.service.as_str(), plan.name.as_str())
            .map_err(ReconcileError::malformed(Operation::Create))?;
        let id = key.to_string();

        let payload = translate::to_create_payload(plan);
        guarded(cancel, Operation::Create, &id, self.api.create(&payload)).await?;

        let repository = guarded(
            cancel,
            Operation::Create,
            &id,
            self.api.get(key.service(), key.name()),
        )
        .await
        .map_err(|err| match err {
            ReconcileError::Client { source, .. } => ReconcileError::CreatedButUnreadable {
                service: key.service().to_string(),
                name: key.name().to_string(),
                id: id.clone(),
                source,
            },
            other => other,
        })?;

        let record = observed(&repository, Operation::Create)?;
        tracing::info!(id = %id, "Created coveralls repository");
        Ok(record)
    }

    /// Refresh a record from the remote. A 404 is reported as
    /// [`ReadOutcome::Absent`], not as an error.
    pub async fn read(
        &self,
        state: &ManagedResourceRecord,
        cancel: &CancellationToken,
    ) -> ReconcileResult<ReadOutcome> {
        let outcome = self.read_as(state, Operation::Read, cancel).await?;
        if let ReadOutcome::Found(record) = &outcome {
            tracing::info!(id = ?record.id, "Read coveralls repository");
        }
        Ok(outcome)
    }

    async fn read_as(
        &self,
        state: &ManagedResourceRecord,
        operation: Operation,
        cancel: &CancellationToken,
    ) -> ReconcileResult<ReadOutcome> {
        let key = state
            .repository_id()
            .map_err(ReconcileError::malformed(operation))?;
        let id = key.to_string();

        match guarded(cancel, operation, &id, self.api.get(key.service(), key.name())).await {
            Ok(repository) => Ok(ReadOutcome::Found(observed(&repository, operation)?)),
            Err(ReconcileError::Client { source, .. }) if source.is_not_found() => {
                tracing::warn!(
                    id = %id,
                    operation = %operation,
                    "Coveralls repository not found; removing from state"
                );
                Ok(ReadOutcome::Absent {
                    id,
                    message: source.to_string(),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Apply the plan's settings. `service` and `name` are taken from the
    /// plan's `id` and are never rewritten.
    pub async fn update(
        &self,
        plan: &ManagedResourceRecord,
        cancel: &CancellationToken,
    ) -> ReconcileResult<ManagedResourceRecord> {
        let key = plan
            .repository_id()
            .map_err(ReconcileError::malformed(Operation::Update))?;
        let id = key.to_string();

        let payload = translate::to_update_payload(plan);
        guarded(
            cancel,
            Operation::Update,
            &id,
            self.api.update(key.service(), key.name(), &payload),
        )
        .await?;

        let repository = guarded(
            cancel,
            Operation::Update,
            &id,
            self.api.get(key.service(), key.name()),
        )
        .await?;

        let record = observed(&repository, Operation::Update)?;
        tracing::info!(id = %id, "Updated coveralls repository");
        Ok(record)
    }

    /// Coveralls exposes no delete endpoint. The repository is left intact
    /// and the orchestrator drops it from state.
    pub fn delete(&self, state: &ManagedResourceRecord) -> Diagnostic {
        let id = state.id.as_deref().unwrap_or("<unknown>");
        tracing::warn!(
            id = %id,
            operation = %Operation::Delete,
            "Delete not supported by Coveralls API"
        );
        Diagnostic::warning(
            "Delete not supported by Coveralls API",
            format!(
                "Repository {id} was removed from state but still exists in Coveralls. \
                 Remove it through the Coveralls web interface if it is no longer needed."
            ),
        )
    }

    /// Import by composite identifier, then populate through the read path.
    pub async fn import(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> ReconcileResult<ManagedResourceRecord> {
        let key: RepositoryId = id
            .parse()
            .map_err(ReconcileError::malformed(Operation::Import))?;

        let seed = ManagedResourceRecord::from_id(id);
        match self.read_as(&seed, Operation::Import, cancel).await? {
            ReadOutcome::Found(record) => {
                tracing::info!(id = %id, "Imported coveralls repository");
                Ok(record)
            }
            // Importing something that does not exist is an error, not an empty state.
            ReadOutcome::Absent { id, .. } => Err(ReconcileError::Client {
                operation: Operation::Import,
                id,
                source: ClientError::not_found(key.service(), key.name()),
            }),
        }
    }
}

/// Translate an API response into a record, rejecting unusable keys.
pub(crate) fn observed(
    repository: &RemoteRepository,
    operation: Operation,
) -> ReconcileResult<ManagedResourceRecord> {
    translate::to_record(repository).map_err(ReconcileError::malformed(operation))
}

/// Run one network call, abandoning it if `cancel` fires first.
///
/// Dropping the request future aborts the HTTP exchange.
pub(crate) async fn guarded<T>(
    cancel: &CancellationToken,
    operation: Operation,
    id: &str,
    call: impl Future<Output = ClientResult<T>>,
) -> ReconcileResult<T> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ReconcileError::Cancelled {
            operation,
            id: id.to_string(),
        }),
        result = call => result.map_err(|source| ReconcileError::Client {
            operation,
            id: id.to_string(),
            source,
        }),
    }
}
