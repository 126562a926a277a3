use std::fmt;

use reqwest::header::HeaderValue;

use crate::error::{ClientError, ClientResult};

/// Coveralls personal API token.
///
/// The value is never printed by `Debug` and is marked sensitive when turned
/// into an `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap a raw token, rejecting an empty value.
    pub fn new(token: impl Into<String>) -> ClientResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ClientError::InvalidConfig("API token must not be empty".into()));
        }
        Ok(Self(token))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value in the `token <value>` scheme.
    pub(crate) fn header_value(&self) -> ClientResult<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("token {}", self.0))
            .map_err(|e| ClientError::InvalidConfig(format!("Invalid API token: {e}")))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}
