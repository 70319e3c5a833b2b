//! # now-core
//!
//! Request execution and configuration for the Now deployment API.
//!
//! Every API operation is a single HTTP exchange described by a
//! [`RequestDescription`] and run by the [`RequestExecutor`], which selects a
//! field out of the response envelope when asked and reduces failures to a
//! [`NormalizedError`].
//!
//! ## Modules
//!
//! - [`error`] - Error types and failure normalization results
//! - [`request`] - Declarative request descriptions
//! - [`transport`] - Transport trait and the `reqwest` implementation
//! - [`executor`] - Request execution and error normalization
//! - [`config`] - Client configuration and token resolution
//! - [`client`] - HTTP client tuning

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod request;
pub mod transport;

// Re-export commonly used types
pub use error::{Error, MissingParameter, NormalizedError, Result};
pub use executor::RequestExecutor;
pub use request::{Method, RequestDescription};
pub use transport::{ReqwestTransport, Transport, TransportFailure};
