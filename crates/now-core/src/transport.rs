//! Transport abstraction and the `reqwest` implementation.
//!
//! The executor only needs something that can send a [`RequestDescription`]
//! and hand back a decoded JSON body or a failure. [`ReqwestTransport`] does
//! that against a base URL with bearer authorization and a fixed timeout.

use crate::client::ClientConfig;
use crate::config::NowClientConfig;
use crate::request::RequestDescription;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, ClientBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("now-core/", env!("CARGO_PKG_VERSION"));

/// A failed exchange, before normalization.
///
/// `data` holds the decoded response body of a non-2xx response; it is
/// `None` when no response was received at all.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportFailure {
    /// Decoded response body, if a response arrived
    pub data: Option<Value>,
    /// Description of the failure
    pub message: String,
}

impl TransportFailure {
    /// A failure carrying a response payload.
    #[must_use]
    pub fn with_data(data: Value, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
        }
    }

    /// A failure with no response payload.
    #[must_use]
    pub fn bare(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportFailure {}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        Self::bare(err.to_string())
    }
}

/// Sends a single request and returns the decoded body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportFailure`] when no response was received or the
    /// response status was not 2xx.
    async fn send(&self, request: RequestDescription)
        -> std::result::Result<Value, TransportFailure>;
}

/// Builder for [`ReqwestTransport`].
pub struct ReqwestTransportBuilder {
    base_url: Url,
    token: SecretString,
    http_config: ClientConfig,
}

impl fmt::Debug for ReqwestTransportBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransportBuilder")
            .field("base_url", &self.base_url.as_str())
            .field("http_config", &self.http_config)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransportBuilder {
    /// Create a builder for the given base URL and bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>, token: SecretString) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            base_url,
            token,
            http_config: ClientConfig::new(),
        })
    }

    /// Create a builder from a validated client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL cannot be parsed.
    pub fn from_config(config: &NowClientConfig, token: SecretString) -> Result<Self> {
        Ok(Self {
            base_url: config.parse_api_url()?,
            token,
            http_config: config.http_config(),
        })
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the
    /// underlying HTTP client cannot be created.
    pub fn build(self) -> Result<ReqwestTransport> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.token.expose_secret()))
            .map_err(|err| Error::Config(format!("Invalid API token: {err}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(self.http_config.timeout)
            .connect_timeout(self.http_config.connect_timeout)
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host)
            .gzip(self.http_config.enable_compression)
            .build()
            .map_err(|err| Error::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(ReqwestTransport {
            http,
            base_url: self.base_url,
        })
    }
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
    base_url: Url,
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Start a builder.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn builder(base_url: impl AsRef<str>, token: SecretString) -> Result<ReqwestTransportBuilder> {
        ReqwestTransportBuilder::new(base_url, token)
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> std::result::Result<Url, TransportFailure> {
        self.base_url
            .join(path)
            .map_err(|err| TransportFailure::bare(format!("Invalid path `{path}`: {err}")))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: RequestDescription,
    ) -> std::result::Result<Value, TransportFailure> {
        let url = self.build_url(request.path())?;
        let method = request.method();

        debug!(%method, path = %request.path(), "sending Now API request");

        let mut builder = self.http.request(method.into(), url);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let data = decode_body(&text);

        if status.is_success() {
            return Ok(data);
        }

        warn!(%method, path = %request.path(), %status, "Now API request failed");
        Err(TransportFailure::with_data(
            data,
            format!("Request failed with status code {}", status.as_u16()),
        ))
    }
}

/// Empty bodies decode to `null`, JSON bodies to their value and anything else
/// to a JSON string holding the raw text.
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
