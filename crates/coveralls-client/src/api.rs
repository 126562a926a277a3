use async_trait::async_trait;

use crate::client::CoverallsClient;
use crate::error::ClientResult;
use crate::model::{RemoteRepository, RepositoryPayload};

/// The remote operations the reconciliation layer depends on.
///
/// Implemented by [`CoverallsClient`]; tests substitute an in-memory fake.
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    async fn create(&self, repository: &RepositoryPayload) -> ClientResult<RemoteRepository>;

    async fn get(&self, service: &str, name: &str) -> ClientResult<RemoteRepository>;

    async fn update(
        &self,
        service: &str,
        name: &str,
        repository: &RepositoryPayload,
    ) -> ClientResult<RemoteRepository>;
}

#[async_trait]
impl RepositoryApi for CoverallsClient {
    async fn create(&self, repository: &RepositoryPayload) -> ClientResult<RemoteRepository> {
        CoverallsClient::create(self, repository).await
    }

    async fn get(&self, service: &str, name: &str) -> ClientResult<RemoteRepository> {
        CoverallsClient::get(self, service, name).await
    }

    async fn update(
        &self,
        service: &str,
        name: &str,
        repository: &RepositoryPayload,
    ) -> ClientResult<RemoteRepository> {
        CoverallsClient::update(self, service, name, repository).await
    }
}
