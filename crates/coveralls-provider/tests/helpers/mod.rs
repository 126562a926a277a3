//! In-memory stand-in for the Coveralls API that records every call.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use coveralls_client::{
    ClientError, ClientResult, RemoteRepository, RepositoryApi, RepositoryPayload,
};

pub const CREATED_AT: &str = "2024-01-01T00:00:00Z";
pub const UPDATED_AT: &str = "2024-02-01T00:00:00Z";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(RepositoryPayload),
    Get {
        service: String,
        name: String,
    },
    Update {
        service: String,
        name: String,
        payload: RepositoryPayload,
    },
}

/// How the next get should fail, if at all.
#[derive(Debug, Clone, Copy)]
pub enum GetFailure {
    Remote(u16),
    NotFound,
    /// Never resolve, so only cancellation can end the call.
    Hang,
}

#[derive(Default)]
pub struct FakeRepositoryApi {
    calls: Mutex<Vec<Call>>,
    repos: Mutex<HashMap<(String, String), RemoteRepository>>,
    get_failure: Mutex<Option<GetFailure>>,
}

impl FakeRepositoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing repository; its token is `tok-<name>`.
    pub fn with_repository(self, service: &str, name: &str) -> Self {
        self.repos.lock().unwrap().insert(
            (service.to_string(), name.to_string()),
            RemoteRepository {
                service: service.to_string(),
                name: name.to_string(),
                token: Some(format!("tok-{name}")),
                created_at: Some(CREATED_AT.to_string()),
                updated_at: Some(CREATED_AT.to_string()),
                ..Default::default()
            },
        );
        self
    }

    pub fn fail_gets(&self, failure: GetFailure) {
        *self.get_failure.lock().unwrap() = Some(failure);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored(&self, service: &str, name: &str) -> Option<RemoteRepository> {
        self.repos
            .lock()
            .unwrap()
            .get(&(service.to_string(), name.to_string()))
            .cloned()
    }
}

fn without_token(repo: &RemoteRepository) -> RemoteRepository {
    RemoteRepository {
        token: None,
        ..repo.clone()
    }
}

#[async_trait]
impl RepositoryApi for FakeRepositoryApi {
    async fn create(&self, repository: &RepositoryPayload) -> ClientResult<RemoteRepository> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Create(repository.clone()));

        let service = repository.service.clone().unwrap_or_default();
        let name = repository.name.clone().unwrap_or_default();
        let repo = RemoteRepository {
            service: service.clone(),
            name: name.clone(),
            token: Some(format!("tok-{name}")),
            comment_on_pull_requests: repository.comment_on_pull_requests,
            send_build_status: repository.send_build_status,
            commit_status_fail_threshold: repository.commit_status_fail_threshold,
            commit_status_fail_change_threshold: repository.commit_status_fail_change_threshold,
            created_at: Some(CREATED_AT.to_string()),
            updated_at: Some(CREATED_AT.to_string()),
        };
        self.repos
            .lock()
            .unwrap()
            .insert((service, name), repo.clone());

        Ok(without_token(&repo))
    }

    async fn get(&self, service: &str, name: &str) -> ClientResult<RemoteRepository> {
        self.calls.lock().unwrap().push(Call::Get {
            service: service.to_string(),
            name: name.to_string(),
        });

        let failure = *self.get_failure.lock().unwrap();
        match failure {
            Some(GetFailure::Remote(status)) => {
                return Err(ClientError::Remote {
                    status,
                    body: "service unavailable".to_string(),
                });
            }
            Some(GetFailure::NotFound) => return Err(ClientError::not_found(service, name)),
            Some(GetFailure::Hang) => std::future::pending::<()>().await,
            None => {}
        }

        self.stored(service, name)
            .ok_or_else(|| ClientError::not_found(service, name))
    }

    async fn update(
        &self,
        service: &str,
        name: &str,
        repository: &RepositoryPayload,
    ) -> ClientResult<RemoteRepository> {
        self.calls.lock().unwrap().push(Call::Update {
            service: service.to_string(),
            name: name.to_string(),
            payload: repository.clone(),
        });

        let mut repos = self.repos.lock().unwrap();
        let repo = repos
            .get_mut(&(service.to_string(), name.to_string()))
            .ok_or_else(|| ClientError::not_found(service, name))?;
        repo.comment_on_pull_requests = repository.comment_on_pull_requests;
        repo.send_build_status = repository.send_build_status;
        repo.commit_status_fail_threshold = repository.commit_status_fail_threshold;
        repo.commit_status_fail_change_threshold = repository.commit_status_fail_change_threshold;
        repo.updated_at = Some(UPDATED_AT.to_string());

        Ok(without_token(repo))
    }
}
