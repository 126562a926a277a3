//! Composite repository identifiers.
//!
//! A managed repository is identified by `<service>:<name>`, for example
//! `github:org/app`. Decoding splits on the first separator, so a name may
//! itself contain `:` while a service may not.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Separator between the service and the name in a composite identifier.
pub const ID_SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("Malformed repository identifier \"{0}\": expected <service>:<name>")]
    MissingSeparator(String),

    #[error("Malformed repository identifier \"{0}\": service and name must not be empty")]
    EmptyPart(String),

    #[error("Malformed repository service \"{0}\": must not contain ':'")]
    SeparatorInService(String),
}

/// The natural key of a remote repository.
///
/// Both parts are immutable once the repository exists; together they form
/// the lookup path on the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryId {
    service: String,
    name: String,
}

impl RepositoryId {
    /// Build an identifier from its parts, rejecting keys that would not
    /// survive an encode/decode round trip.
    pub fn new(service: impl Into<String>, name: impl Into<String>) -> Result<Self, IdError> {
        let service = service.into();
        let name = name.into();

        if service.is_empty() || name.is_empty() {
            return Err(IdError::EmptyPart(format!("{service}{ID_SEPARATOR}{name}")));
        }
        if service.contains(ID_SEPARATOR) {
            return Err(IdError::SeparatorInService(service));
        }

        Ok(Self { service, name })
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_parts(self) -> (String, String) {
        (self.service, self.name)
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.service, ID_SEPARATOR, self.name)
    }
}

impl FromStr for RepositoryId {
    type Err = IdError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let (service, name) = id
            .split_once(ID_SEPARATOR)
            .ok_or_else(|| IdError::MissingSeparator(id.to_string()))?;

        if service.is_empty() || name.is_empty() {
            return Err(IdError::EmptyPart(id.to_string()));
        }

        Ok(Self {
            service: service.to_string(),
            name: name.to_string(),
        })
    }
}

/// Encode a service and name into the composite identifier.
pub fn encode(service: &str, name: &str) -> Result<String, IdError> {
    RepositoryId::new(service, name).map(|id| id.to_string())
}

/// Decode a composite identifier into `(service, name)`.
pub fn decode(id: &str) -> Result<(String, String), IdError> {
    id.parse::<RepositoryId>().map(RepositoryId::into_parts)
}
