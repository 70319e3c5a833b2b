//! Request execution and failure normalization.

use crate::error::{Error, NormalizedError, Result};
use crate::request::RequestDescription;
use crate::transport::{Transport, TransportFailure};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Issues [`RequestDescription`]s through a shared [`Transport`].
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
}

impl RequestExecutor {
    /// Create an executor over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send the request and return the decoded body, or `body[selector]` when a
    /// selector is given. An absent field selects `null`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Remote`] with the failure normalized by
    /// [`normalize_failure`].
    pub async fn execute(
        &self,
        request: RequestDescription,
        selector: Option<&str>,
    ) -> Result<Value> {
        let body = self
            .transport
            .send(request)
            .await
            .map_err(|failure| Error::Remote(normalize_failure(failure)))?;

        Ok(match selector {
            Some(field) => select(body, field),
            None => body,
        })
    }

    /// Like [`execute`](Self::execute), decoding the result into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Remote`] on failure and [`Error::Parse`] when the
    /// result does not decode into `T`.
    pub async fn execute_as<T>(
        &self,
        request: RequestDescription,
        selector: Option<&str>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let path = request.path().to_string();
        let value = self.execute(request, selector).await?;
        serde_json::from_value(value).map_err(|err| {
            debug!(path = %path, error = %err, "unexpected response shape");
            Error::Parse(format!("Failed to parse response for `{path}`: {err}"))
        })
    }
}

fn select(body: Value, field: &str) -> Value {
    match body {
        Value::Object(mut map) => map.remove(field).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Reduce a failure to its most specific shape: the nested `data.err`
/// structure, else the `data` payload, else the failure's string form.
///
/// A `null` or empty-string body carries no payload, and a `null` `err`
/// is not a structure.
#[must_use]
pub fn normalize_failure(failure: TransportFailure) -> NormalizedError {
    match failure.data {
        Some(Value::Object(mut data)) => {
            if data.get("err").is_some_and(|err| !err.is_null()) {
                if let Some(err) = data.remove("err") {
                    return NormalizedError::Structured(err);
                }
            }
            NormalizedError::Payload(Value::Object(data))
        }
        Some(Value::Null) | None => NormalizedError::Message(failure.message),
        Some(Value::String(text)) if text.is_empty() => NormalizedError::Message(failure.message),
        Some(data) => NormalizedError::Payload(data),
    }
}
