//! Mapping between orchestrator records and the Coveralls wire model.

use coveralls_client::{RemoteRepository, RepositoryPayload};
use coveralls_core::{IdError, ManagedResourceRecord, encode};

/// Request body for create: the writable settings plus the key fields.
pub fn to_create_payload(record: &ManagedResourceRecord) -> RepositoryPayload {
    RepositoryPayload {
        service: Some(record.service.clone()),
        name: Some(record.name.clone()),
        ..settings(record)
    }
}

/// Request body for update. The key lives in the URL and is never sent.
pub fn to_update_payload(record: &ManagedResourceRecord) -> RepositoryPayload {
    settings(record)
}

fn settings(record: &ManagedResourceRecord) -> RepositoryPayload {
    RepositoryPayload {
        service: None,
        name: None,
        comment_on_pull_requests: record.comment_on_pull_requests,
        send_build_status: record.send_build_status,
        commit_status_fail_threshold: record.commit_status_fail_threshold,
        commit_status_fail_change_threshold: record.commit_status_fail_change_threshold,
    }
}

/// Observed record for a repository returned by the API, with `id` derived
/// from its key.
pub fn to_record(repository: &RemoteRepository) -> Result<ManagedResourceRecord, IdError> {
    Ok(ManagedResourceRecord {
        id: Some(encode(&repository.service, &repository.name)?),
        service: repository.service.clone(),
        name: repository.name.clone(),
        token: repository.token.clone(),
        comment_on_pull_requests: repository.comment_on_pull_requests,
        send_build_status: repository.send_build_status,
        commit_status_fail_threshold: repository.commit_status_fail_threshold,
        commit_status_fail_change_threshold: repository.commit_status_fail_change_threshold,
        created_at: repository.created_at.clone(),
        updated_at: repository.updated_at.clone(),
    })
}
