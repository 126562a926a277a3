use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::ApiToken;
use crate::error::{ClientError, ClientResult};
use crate::model::{RemoteRepository, RepoEnvelope, RepositoryPayload};

/// Public Coveralls origin.
pub const DEFAULT_ENDPOINT: &str = "https://coveralls.io";

/// Negotiated for both `Accept` and `Content-Type` on every request.
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Authenticated client bound to one endpoint and one credential.
///
/// Holds no per-call state, so a single instance can be shared across tasks.
#[derive(Debug, Clone)]
pub struct CoverallsClient {
    http: reqwest::Client,
    base_url: String,
    repos_url: Url,
    authorization: HeaderValue,
}

impl CoverallsClient {
    pub fn new(base_url: &str, token: &ApiToken) -> ClientResult<Self> {
        Self::with_http_client(base_url, token, build_http(http_builder())?)
    }

    /// Like [`new`](Self::new) with a whole-request timeout.
    pub fn with_timeout(base_url: &str, token: &ApiToken, timeout: Duration) -> ClientResult<Self> {
        Self::with_http_client(base_url, token, build_http(http_builder().timeout(timeout))?)
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_http_client(
        base_url: &str,
        token: &ApiToken,
        http: reqwest::Client,
    ) -> ClientResult<Self> {
        let base_url = base_url.trim_end_matches('/');
        let repos_url = Url::parse(&format!("{base_url}/api/repos"))
            .map_err(|e| ClientError::InvalidConfig(format!("Invalid endpoint {base_url}: {e}")))?;
        if repos_url.cannot_be_a_base() {
            return Err(ClientError::InvalidConfig(format!(
                "Invalid endpoint {base_url}: not a hierarchical URL"
            )));
        }

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            repos_url,
            authorization: token.header_value()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> Url {
        self.repos_url.clone()
    }

    /// `{repos}/{service}/{name}` with every segment percent-encoded. The
    /// `/` inside a name stays a path separator.
    fn item_url(&self, service: &str, name: &str) -> ClientResult<Url> {
        let mut url = self.repos_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::InvalidConfig(format!("Invalid endpoint {}", self.base_url))
            })?
            .push(service)
            .extend(name.split('/'));
        Ok(url)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header(ACCEPT, CONTENT_TYPE_JSON)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(AUTHORIZATION, self.authorization.clone())
    }

    /// Create a repository. The returned repository never carries the token.
    pub async fn create(&self, repository: &RepositoryPayload) -> ClientResult<RemoteRepository> {
        let service = repository.service.as_deref().unwrap_or_default();
        let name = repository.name.as_deref().unwrap_or_default();
        tracing::debug!(service, name, "Creating coveralls repository");

        let resp = self
            .request(reqwest::Method::POST, self.collection_url())
            .json(&RepoEnvelope::new(repository))
            .send()
            .await?;
        let envelope: RepoEnvelope<RemoteRepository> =
            handle_response(resp, service, name).await?;
        Ok(envelope.into_inner())
    }

    /// Fetch a repository, including its token.
    pub async fn get(&self, service: &str, name: &str) -> ClientResult<RemoteRepository> {
        tracing::debug!(service, name, "Retrieving coveralls repository");

        let resp = self
            .request(reqwest::Method::GET, self.item_url(service, name)?)
            .send()
            .await?;
        handle_response(resp, service, name).await
    }

    /// Update a repository's settings. The returned repository never carries the token.
    pub async fn update(
        &self,
        service: &str,
        name: &str,
        repository: &RepositoryPayload,
    ) -> ClientResult<RemoteRepository> {
        tracing::debug!(service, name, "Updating coveralls repository");

        let resp = self
            .request(reqwest::Method::PUT, self.item_url(service, name)?)
            .json(&RepoEnvelope::new(repository))
            .send()
            .await?;
        let envelope: RepoEnvelope<RemoteRepository> =
            handle_response(resp, service, name).await?;
        Ok(envelope.into_inner())
    }
}

fn http_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder().user_agent(concat!("coveralls-provider/", env!("CARGO_PKG_VERSION")))
}

fn build_http(builder: reqwest::ClientBuilder) -> ClientResult<reqwest::Client> {
    builder
        .build()
        .map_err(|e| ClientError::InvalidConfig(format!("Failed to build HTTP client: {e}")))
}

async fn handle_response<T: DeserializeOwned>(
    resp: reqwest::Response,
    service: &str,
    name: &str,
) -> ClientResult<T> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        tracing::debug!(
            status_code = status.as_u16(),
            error_message = %body,
            service,
            name,
            "Error response received"
        );
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::not_found(service, name));
        }
        return Err(ClientError::Remote {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(ClientError::Decode)
}
