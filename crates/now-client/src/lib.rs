//! Now API client for Rust.
//!
//! Typed, asynchronous wrappers over the Now deployment platform API:
//! deployments and their files, domains and DNS records, certificates,
//! aliases and secrets. Each method issues exactly one request; required
//! identifiers are checked first and a missing one fails without touching
//! the network.
//!
//! ```no_run
//! # async fn example() -> now_client::Result<()> {
//! let client = now_client::NowClient::from_env()?;
//! for deployment in client.list_deployments().await? {
//!     println!("{} {:?}", deployment.uid, deployment.url);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod aliases;
pub mod certificates;
pub mod client;
pub mod deployments;
pub mod domains;
pub mod models;
pub mod secrets;

#[cfg(test)]
mod testing;

pub use client::{NowClient, NowClientBuilder};
pub use models::{
    AddDomainRequest, Alias, Certificate, Created, Creator, Deployment, DeploymentFile, DnsRecord,
    DnsRecordRequest, Domain, ReplaceCertificateRequest, Secret,
};
pub use now_core::{Error, MissingParameter, NormalizedError};

/// Convenient result alias that reuses the shared Now error type.
pub type Result<T> = now_core::Result<T>;
