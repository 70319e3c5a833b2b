//! Error types for Now API operations.
//!
//! Two families of failures exist: parameters that are missing before a
//! request is ever built, and failures reported by the transport or the
//! remote API. The latter are collapsed into a [`NormalizedError`] so callers
//! receive the most specific error shape available.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Main error type for Now operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A required parameter was absent; no request was sent.
    #[error("{}", .0.message())]
    MissingParameter(MissingParameter),

    /// The transport or the remote API reported a failure.
    #[error("Remote error: {0}")]
    Remote(NormalizedError),

    /// A successful response did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for Now operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Required parameters checked by endpoint callers before any request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingParameter {
    /// Resource identifier (deployment, alias, secret, record)
    Id,
    /// Deployment file identifier
    FileId,
    /// Request payload
    Body,
    /// Certificate common name
    CommonName,
    /// Alias hostname
    Alias,
    /// Domain or secret name
    Name,
    /// Secret value
    Value,
}

impl MissingParameter {
    /// Returns the fixed error code for this parameter.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Id => "missing_id",
            Self::FileId => "missing_file_id",
            Self::Body => "missing_body",
            Self::CommonName => "missing_cn",
            Self::Alias => "missing_alias",
            Self::Name => "missing_name",
            Self::Value => "missing_value",
        }
    }

    /// Returns the fixed human-readable message for this parameter.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Id => "Missing `id` parameter",
            Self::FileId => "Missing `fileId` parameter",
            Self::Body => "Missing `body` parameter",
            Self::CommonName => "Missing `cn` parameter",
            Self::Alias => "Missing `alias` parameter",
            Self::Name => "Missing `name` parameter",
            Self::Value => "Missing `value` parameter",
        }
    }

    /// Converts into the `{code, message}` detail pair.
    #[must_use]
    pub fn detail(self) -> ErrorDetail {
        ErrorDetail {
            code: self.code().to_string(),
            message: self.message().to_string(),
        }
    }
}

impl fmt::Display for MissingParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A transport or remote failure reduced to its most specific shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedError {
    /// The structured `err` object nested in the failure payload.
    Structured(Value),
    /// The raw failure payload, when no structured error was nested in it.
    Payload(Value),
    /// String representation of an opaque failure.
    Message(String),
}

impl NormalizedError {
    /// Returns the `code` field of a structured or payload error, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Structured(value) | Self::Payload(value) => {
                value.get("code").and_then(Value::as_str)
            }
            Self::Message(_) => None,
        }
    }

    /// Returns the JSON value carried by this error.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Structured(value) | Self::Payload(value) => value.clone(),
            Self::Message(message) => Value::String(message.clone()),
        }
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured(value) | Self::Payload(value) => match value {
                Value::String(text) => f.write_str(text),
                other => write!(f, "{other}"),
            },
            Self::Message(message) => f.write_str(message),
        }
    }
}

/// `{code, message}` pair for programmatic handling.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl Error {
    /// Returns the error code for this error.
    ///
    /// Missing parameters report their fixed code, remote errors the `code`
    /// field of the API error body when one was returned.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::MissingParameter(param) => param.code(),
            Self::Remote(err) => err.code().unwrap_or("REMOTE_ERROR"),
            Self::Parse(_) => "PARSE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// Returns the missing parameter, if this error was raised locally.
    #[must_use]
    pub const fn missing_parameter(&self) -> Option<MissingParameter> {
        match self {
            Self::MissingParameter(param) => Some(*param),
            _ => None,
        }
    }

    /// Returns the normalized remote error, if any.
    #[must_use]
    pub const fn as_remote(&self) -> Option<&NormalizedError> {
        match self {
            Self::Remote(err) => Some(err),
            _ => None,
        }
    }

    /// Converts the error into a `{code, message}` pair.
    #[must_use]
    pub fn detail(&self) -> ErrorDetail {
        match self {
            Self::MissingParameter(param) => param.detail(),
            other => ErrorDetail {
                code: other.code().to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl From<MissingParameter> for Error {
    fn from(param: MissingParameter) -> Self {
        Self::MissingParameter(param)
    }
}

impl From<NormalizedError> for Error {
    fn from(err: NormalizedError) -> Self {
        Self::Remote(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_parameter_codes() {
        assert_eq!(MissingParameter::Id.code(), "missing_id");
        assert_eq!(MissingParameter::FileId.code(), "missing_file_id");
        assert_eq!(MissingParameter::Body.code(), "missing_body");
        assert_eq!(MissingParameter::CommonName.code(), "missing_cn");
        assert_eq!(MissingParameter::Alias.code(), "missing_alias");
        assert_eq!(MissingParameter::Name.code(), "missing_name");
        assert_eq!(MissingParameter::Value.code(), "missing_value");
    }

    #[test]
    fn test_alias_code_is_distinct_from_body() {
        assert_ne!(MissingParameter::Alias.code(), MissingParameter::Body.code());
    }

    #[test]
    fn test_missing_parameter_detail() {
        let detail = Error::from(MissingParameter::FileId).detail();
        assert_eq!(
            detail,
            ErrorDetail {
                code: "missing_file_id".to_string(),
                message: "Missing `fileId` parameter".to_string(),
            }
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::MissingParameter(MissingParameter::CommonName);
        assert_eq!(err.to_string(), "Missing `cn` parameter");

        let err = Error::Remote(NormalizedError::Payload(json!("plain text")));
        assert_eq!(err.to_string(), "Remote error: plain text");

        let err = Error::Remote(NormalizedError::Structured(json!({"code": "x"})));
        assert_eq!(err.to_string(), r#"Remote error: {"code":"x"}"#);
    }

    #[test]
    fn test_remote_error_code() {
        let err = Error::Remote(NormalizedError::Structured(json!({
            "code": "not_found",
            "message": "Deployment not found"
        })));
        assert_eq!(err.code(), "not_found");

        let err = Error::Remote(NormalizedError::Message("connection refused".into()));
        assert_eq!(err.code(), "REMOTE_ERROR");
    }

    #[test]
    fn test_accessors() {
        let err = Error::from(MissingParameter::Value);
        assert_eq!(err.missing_parameter(), Some(MissingParameter::Value));
        assert!(err.as_remote().is_none());

        let err = Error::from(NormalizedError::Message("boom".into()));
        assert!(err.missing_parameter().is_none());
        assert_eq!(
            err.as_remote(),
            Some(&NormalizedError::Message("boom".into()))
        );
    }

    #[test]
    fn test_normalized_error_serializes_untagged() {
        let err = NormalizedError::Structured(json!({"code": "x"}));
        assert_eq!(serde_json::to_value(&err).unwrap(), json!({"code": "x"}));

        let err = NormalizedError::Message("timeout".into());
        assert_eq!(serde_json::to_value(&err).unwrap(), json!("timeout"));
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let now_err: Error = err.into();
        assert!(matches!(now_err, Error::InvalidEndpoint(_)));
        assert_eq!(now_err.code(), "INVALID_ENDPOINT");
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<Value>("{invalid json}").unwrap_err();
        let now_err: Error = err.into();
        assert!(matches!(now_err, Error::Parse(_)));
    }
}
