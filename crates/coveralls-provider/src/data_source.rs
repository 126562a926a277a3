use std::sync::Arc;

use coveralls_client::RepositoryApi;
use coveralls_core::{ManagedResourceRecord, RepositoryId};
use tokio_util::sync::CancellationToken;

use crate::error::{Operation, ReconcileError, ReconcileResult};
use crate::resource::{guarded, observed};

/// Read-only lookup of an existing repository by service and name.
pub struct RepositoryDataSource {
    api: Arc<dyn RepositoryApi>,
}

impl RepositoryDataSource {
    pub fn new(api: Arc<dyn RepositoryApi>) -> Self {
        Self { api }
    }

    /// Unlike the resource read, a missing repository is an error here.
    pub async fn read(
        &self,
        service: &str,
        name: &str,
        cancel: &CancellationToken,
    ) -> ReconcileResult<ManagedResourceRecord> {
        let key = RepositoryId::new(service, name)
            .map_err(ReconcileError::malformed(Operation::Lookup))?;
        let id = key.to_string();

        let repository = guarded(cancel, Operation::Lookup, &id, self.api.get(service, name))
            .await
            .inspect_err(|e| tracing::error!(id = %id, error = %e, "Coveralls repository lookup failed"))?;

        let record = observed(&repository, Operation::Lookup)?;
        tracing::info!(id = %id, "Looked up coveralls repository");
        Ok(record)
    }
}
