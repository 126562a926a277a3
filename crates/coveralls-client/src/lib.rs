//! Client for the Coveralls repository REST API.
//!
//! Three logical operations are exposed: create (`POST /api/repos`),
//! get (`GET /api/repos/{service}/{name}`) and update
//! (`PUT /api/repos/{service}/{name}`). Create and update wrap the resource
//! in a `{ "repo": ... }` envelope and never return the repository token;
//! only get returns it.

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod model;

pub use api::RepositoryApi;
pub use auth::ApiToken;
pub use client::{CONTENT_TYPE_JSON, CoverallsClient, DEFAULT_ENDPOINT};
pub use error::{ClientError, ClientResult};
pub use model::{RemoteRepository, RepoEnvelope, RepositoryPayload};
