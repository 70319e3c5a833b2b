//! Configuration structures for Now clients.
//!
//! This module provides the validated client configuration and the
//! credential resolution routine. Resolution takes every source as an explicit
//! input; [`TokenSources::from_environment`] is the only place that reads the
//! process environment or the home directory.

use crate::client::{ClientConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
use crate::Error;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use validator::Validate;

/// Default API origin.
pub const DEFAULT_API_URL: &str = "https://api.zeit.co";

/// Environment variable consulted for the API token.
pub const TOKEN_ENV_VAR: &str = "NOW_TOKEN";

/// Name of the JSON configuration file in the user's home directory.
pub const CONFIG_FILE_NAME: &str = ".now.json";

/// Configuration for a Now client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NowClientConfig {
    /// API base URL
    #[validate(url)]
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds
    #[validate(range(min = 1, max = 60))]
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

const fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT
}

impl NowClientConfig {
    /// Create a configuration for a custom API origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(api_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            api_url: api_url.into(),
            ..Self::default()
        };

        config
            .validate()
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set connect timeout in seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse and validate the API URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_api_url(&self) -> Result<Url, Error> {
        Url::parse(&self.api_url).map_err(|e| Error::Config(format!("Invalid API URL: {e}")))
    }

    /// HTTP tuning derived from this configuration.
    #[must_use]
    pub fn http_config(&self) -> ClientConfig {
        ClientConfig::new()
            .with_timeout(self.timeout())
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}

impl Default for NowClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Places an API token may come from, in priority order.
#[derive(Debug, Clone, Default)]
pub struct TokenSources {
    /// Token passed explicitly by the caller
    pub explicit: Option<String>,

    /// Value of the `NOW_TOKEN` environment variable
    pub env: Option<String>,

    /// Path to a JSON file with a top-level `token` field
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    token: Option<String>,
}

impl TokenSources {
    /// Create an empty set of sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gather sources from the process environment and home directory.
    #[must_use]
    pub fn from_environment(explicit: Option<String>) -> Self {
        Self {
            explicit,
            env: std::env::var(TOKEN_ENV_VAR).ok(),
            config_file: default_config_path(),
        }
    }

    /// Set the explicit token.
    #[must_use]
    pub fn with_explicit(mut self, token: impl Into<String>) -> Self {
        self.explicit = Some(token.into());
        self
    }

    /// Set the environment token value.
    #[must_use]
    pub fn with_env(mut self, token: impl Into<String>) -> Self {
        self.env = Some(token.into());
        self
    }

    /// Set the configuration file path.
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Resolve the token: explicit argument, then environment, then the
    /// configuration file. Empty values count as absent.
    #[must_use]
    pub fn resolve(&self) -> Option<SecretString> {
        if let Some(token) = non_empty(self.explicit.as_deref()) {
            debug!("using explicitly provided Now token");
            return Some(SecretString::from(token));
        }

        if let Some(token) = non_empty(self.env.as_deref()) {
            debug!(var = TOKEN_ENV_VAR, "using Now token from environment");
            return Some(SecretString::from(token));
        }

        let path = self.config_file.as_deref()?;
        let token = read_config_token(path)?;
        debug!(path = %path.display(), "using Now token from configuration file");
        Some(SecretString::from(token))
    }
}

/// Resolve a token from explicit sources.
#[must_use]
pub fn resolve_token(sources: &TokenSources) -> Option<SecretString> {
    sources.resolve()
}

/// `~/.now.json`, when a home directory is known.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

fn read_config_token(path: &Path) -> Option<String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no Now configuration file");
            return None;
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read Now configuration file");
            return None;
        }
    };

    match serde_json::from_str::<ConfigFile>(&contents) {
        Ok(file) => non_empty(file.token.as_deref()),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "malformed Now configuration file");
            None
        }
    }
}
