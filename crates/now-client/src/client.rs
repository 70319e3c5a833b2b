//! Asynchronous Now API client.

use crate::Result;
use now_core::client::ClientConfig;
use now_core::config::{NowClientConfig, TokenSources, TOKEN_ENV_VAR};
use now_core::transport::ReqwestTransportBuilder;
use now_core::{Error, MissingParameter, RequestExecutor, Transport};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};
use validator::Validate;

/// Bytes escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Builder for [`NowClient`].
#[derive(Default)]
pub struct NowClientBuilder {
    config: NowClientConfig,
    token: Option<String>,
    sources: Option<TokenSources>,
    http_config: Option<ClientConfig>,
    transport: Option<Arc<dyn Transport>>,
}

impl fmt::Debug for NowClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NowClientBuilder")
            .field("config", &self.config)
            .field("has_token", &self.token.is_some())
            .field("custom_transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}

impl NowClientBuilder {
    /// Create a builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the client configuration.
    #[must_use]
    pub fn with_config(mut self, config: NowClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an explicit API token. Takes priority over every other source.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Resolve the token from these sources instead of the process
    /// environment and home directory.
    #[must_use]
    pub fn with_token_sources(mut self, sources: TokenSources) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = Some(config);
        self
    }

    /// Send requests through a custom transport. Token resolution and the
    /// HTTP configuration are skipped.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the configuration is out of range, no
    /// token can be resolved, or the HTTP client cannot be created.
    pub fn build(self) -> Result<NowClient> {
        self.config.validate()?;

        if let Some(transport) = self.transport {
            return Ok(NowClient::with_transport(transport));
        }

        let mut sources = self
            .sources
            .unwrap_or_else(|| TokenSources::from_environment(None));
        if self.token.is_some() {
            sources.explicit = self.token;
        }

        let Some(token) = sources.resolve() else {
            error!(
                env = TOKEN_ENV_VAR,
                "no Now API token found; pass one explicitly, set the environment variable or add `token` to ~/.now.json"
            );
            return Err(Error::Config("No Now API token found".to_string()));
        };

        let mut transport = ReqwestTransportBuilder::from_config(&self.config, token)?;
        if let Some(http_config) = self.http_config {
            transport = transport.with_http_config(http_config);
        }
        let transport = transport.build()?;

        debug!(api_url = %self.config.api_url, "Now client ready");
        Ok(NowClient::with_transport(Arc::new(transport)))
    }
}

/// Asynchronous Now API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct NowClient {
    executor: RequestExecutor,
}

impl fmt::Debug for NowClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NowClient").finish_non_exhaustive()
    }
}

impl NowClient {
    /// Construct a client for the default API origin with an explicit token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or the HTTP client cannot be
    /// created.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        NowClientBuilder::new()
            .with_token_sources(TokenSources::new().with_explicit(token))
            .build()
    }

    /// Construct a client whose token comes from `NOW_TOKEN` or `~/.now.json`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when neither source provides a token.
    pub fn from_env() -> Result<Self> {
        NowClientBuilder::new().build()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder() -> NowClientBuilder {
        NowClientBuilder::new()
    }

    /// Construct a client over an existing transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            executor: RequestExecutor::new(transport),
        }
    }

    /// The executor, for endpoints this client does not wrap.
    #[must_use]
    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }
}

/// Reject empty required parameters before a request is built.
pub(crate) fn require(value: &str, param: MissingParameter) -> Result<&str> {
    if value.is_empty() {
        Err(Error::MissingParameter(param))
    } else {
        Ok(value)
    }
}

/// Serialize a request body; a `null` body counts as missing.
pub(crate) fn require_body<B>(body: &B) -> Result<Value>
where
    B: Serialize + ?Sized,
{
    match serde_json::to_value(body)? {
        Value::Null => Err(Error::MissingParameter(MissingParameter::Body)),
        value => Ok(value),
    }
}

/// Percent-encode a path segment.
///
/// `.` and `..` are rejected: URL resolution would collapse them even when
/// escaped, sending the request to a different resource.
pub(crate) fn segment(value: &str) -> Result<String> {
    if matches!(value, "." | "..") {
        return Err(Error::InvalidEndpoint(format!(
            "`{value}` is not a valid path segment"
        )));
    }
    Ok(utf8_percent_encode(value, PATH_SEGMENT).to_string())
}
