use std::time::Duration;

use coveralls_client::{ApiToken, DEFAULT_ENDPOINT};
use coveralls_core::ErrorCategory;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Environment variable consulted when no token is configured explicitly.
pub const TOKEN_ENV_VAR: &str = "COVERALLS_API_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Missing Coveralls API token: set the token in the provider configuration or use the COVERALLS_API_TOKEN environment variable"
    )]
    MissingToken,

    #[error("Invalid endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("config build error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Explicit credential. Takes precedence over the environment variable.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            request_timeout_ms: default_request_timeout_ms(),
            logging: LoggingConfig::default(),
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("logging", &self.logging)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: "scheme must be http or https".into(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid("request_timeout_ms must be > 0".into()));
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "logging.level must be one of {valid_levels:?}"
            )));
        }
        Ok(())
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Resolve the credential: explicit value, else `COVERALLS_API_TOKEN`.
    pub fn resolve_token(&self) -> Result<ApiToken, ConfigError> {
        resolve_token_from(self.token.as_deref(), std::env::var(TOKEN_ENV_VAR).ok())
    }
}

/// An explicit value wins even when empty, in which case the credential is
/// reported missing rather than falling back to the environment.
pub fn resolve_token_from(
    explicit: Option<&str>,
    from_env: Option<String>,
) -> Result<ApiToken, ConfigError> {
    let token = match explicit {
        Some(value) => value.to_string(),
        None => from_env.unwrap_or_default(),
    };
    ApiToken::new(token).map_err(|_| ConfigError::MissingToken)
}

pub mod loader {
    use super::{ConfigError, ProviderConfig};
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    /// Default configuration file looked up in the working directory.
    pub const DEFAULT_CONFIG_FILE: &str = "coveralls.toml";

    pub fn load_config(path: Option<&str>) -> Result<ProviderConfig, ConfigError> {
        let mut builder = Config::builder();
        match path {
            Some(p) => {
                let pathbuf = PathBuf::from(p);
                if !pathbuf.exists() {
                    return Err(ConfigError::Invalid(format!("config file not found: {p}")));
                }
                builder = builder.add_source(File::from(pathbuf));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    builder = builder.add_source(File::from(default_path));
                }
            }
        }
        // Environment variable overrides, e.g., COVERALLS__ENDPOINT=https://example.test
        builder = builder.add_source(
            Environment::with_prefix("COVERALLS")
                .try_parsing(true)
                .separator("__"),
        );
        let merged: ProviderConfig = builder.build()?.try_deserialize()?;
        merged.validate()?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_api() {
        let cfg = ProviderConfig::default();
        assert_eq!(cfg.endpoint(), "https://coveralls.io");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn explicit_token_wins_over_environment() {
        let token = resolve_token_from(Some("from-config"), Some("from-env".into())).unwrap();
        assert_eq!(token.expose(), "from-config");
    }

    #[test]
    fn environment_token_is_fallback() {
        let token = resolve_token_from(None, Some("from-env".into())).unwrap();
        assert_eq!(token.expose(), "from-env");
    }

    #[test]
    fn missing_token_is_configuration_error() {
        let err = resolve_token_from(None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().contains(TOKEN_ENV_VAR));
    }

    #[test]
    fn explicit_empty_token_does_not_fall_back() {
        let err = resolve_token_from(Some(""), Some("from-env".into())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
    }

    #[test]
    fn trailing_slash_is_trimmed_from_endpoint() {
        let cfg = ProviderConfig {
            endpoint: "https://coveralls.example.com/".into(),
            ..Default::default()
        };
        assert_eq!(cfg.endpoint(), "https://coveralls.example.com");
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let cfg = ProviderConfig {
            endpoint: "ftp://coveralls.io".into(),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidEndpoint { .. })));

        let cfg = ProviderConfig {
            endpoint: "coveralls.io".into(),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidEndpoint { .. })));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = ProviderConfig {
            request_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let mut cfg = ProviderConfig::default();
        cfg.logging.level = "verbose".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = ProviderConfig {
            token: Some("super-secret".into()),
            ..Default::default()
        };
        assert!(!format!("{cfg:?}").contains("super-secret"));
    }

    #[test]
    fn loads_file_values() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("coveralls.toml");
        std::fs::write(
            &path,
            r#"
endpoint = "https://coveralls.example.com"
token = "file-token"
request_timeout_ms = 5000

[logging]
level = "debug"
"#,
        )
        .expect("write toml");

        let cfg = loader::load_config(path.to_str()).expect("should parse config");
        assert_eq!(cfg.endpoint(), "https://coveralls.example.com");
        assert_eq!(cfg.token.as_deref(), Some("file-token"));
        assert_eq!(cfg.request_timeout_ms, 5000);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("absent.toml");
        assert!(loader::load_config(path.to_str()).is_err());
    }

    #[test]
    fn invalid_file_values_fail_validation() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("coveralls.toml");
        std::fs::write(&path, "request_timeout_ms = 0\n").expect("write toml");

        assert!(matches!(
            loader::load_config(path.to_str()),
            Err(ConfigError::Invalid(_))
        ));
    }
}
