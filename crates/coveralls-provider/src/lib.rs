//! Reconciliation of Coveralls repositories.
//!
//! [`Provider`] is configured once with an endpoint and a credential and
//! hands out the `coveralls_repository` resource and data source, which share
//! the same immutable client.

pub mod config;
pub mod data_source;
pub mod diagnostics;
pub mod error;
pub mod observability;
pub mod resource;
pub mod translate;

use std::sync::Arc;

use coveralls_client::{ApiToken, CoverallsClient, RepositoryApi};

pub use config::{ConfigError, LoggingConfig, ProviderConfig};
pub use data_source::RepositoryDataSource;
pub use diagnostics::{Diagnostic, Severity};
pub use error::{Operation, ReconcileError, ReconcileResult};
pub use resource::{RESOURCE_TYPE_NAME, ReadOutcome, RepositoryResource};

/// Provider type name as seen by the orchestrator.
pub const PROVIDER_TYPE_NAME: &str = "coveralls";

/// Provider version reported to the orchestrator.
pub const PROVIDER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A configured provider: one client bound to one endpoint and credential.
#[derive(Clone)]
pub struct Provider {
    api: Arc<dyn RepositoryApi>,
}

impl Provider {
    /// Resolve the credential and build the HTTP client.
    ///
    /// Fails before any network call when the token is missing or the
    /// endpoint is unusable.
    pub fn configure(config: &ProviderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let token = config.resolve_token()?;
        Self::with_token(config, &token)
    }

    fn with_token(config: &ProviderConfig, token: &ApiToken) -> Result<Self, ConfigError> {
        let client = CoverallsClient::with_timeout(config.endpoint(), token, config.request_timeout())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        tracing::debug!(endpoint = %client.base_url(), "Coveralls provider configured");

        Ok(Self::with_api(Arc::new(client)))
    }

    /// Build a provider around any [`RepositoryApi`] implementation.
    pub fn with_api(api: Arc<dyn RepositoryApi>) -> Self {
        Self { api }
    }

    pub fn repository_resource(&self) -> RepositoryResource {
        RepositoryResource::new(Arc::clone(&self.api))
    }

    pub fn repository_data_source(&self) -> RepositoryDataSource {
        RepositoryDataSource::new(Arc::clone(&self.api))
    }
}
