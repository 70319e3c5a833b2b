//! Now API models.
//!
//! Field names follow the API's camelCase JSON. Only identifiers are required;
//! everything else is optional because the API omits fields freely between
//! endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Deployment identifier.
    #[serde(alias = "id", alias = "deploymentId")]
    pub uid: String,
    /// Project name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unique deployment hostname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Deployment type (`NPM`, `DOCKER`, `STATIC`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Lifecycle state (`BUILDING`, `READY`, `FROZEN`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Creation time.
    #[serde(
        default,
        alias = "createdAt",
        skip_serializing_if = "Option::is_none",
        with = "timestamp"
    )]
    pub created: Option<DateTime<Utc>>,
    /// Creator of the deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Creator>,
}

/// The user that created a resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Creator {
    /// User identifier.
    pub uid: String,
}

/// A file entry in a deployment's source tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeploymentFile {
    /// File or directory name.
    pub name: String,
    /// Entry type (`file`, `directory`, `symlink`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// File identifier; directories have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Unix mode bits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<u32>,
    /// Directory contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DeploymentFile>>,
}

impl DeploymentFile {
    /// Returns true for directory entries.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.kind.as_deref() == Some("directory")
    }
}

/// A domain registered with the platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// Domain identifier.
    pub uid: String,
    /// Domain name.
    pub name: String,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
    /// Whether DNS is managed outside the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_external: Option<bool>,
    /// Whether ownership has been verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Aliases under this domain.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Certificates covering this domain.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certs: Vec<String>,
}

/// Request payload for adding a domain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddDomainRequest {
    /// Domain name.
    pub name: String,
    /// Keep DNS outside the platform.
    #[serde(default)]
    pub is_external: bool,
}

impl AddDomainRequest {
    /// Request for a platform-managed domain.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_external: false,
        }
    }

    /// Mark the domain as externally managed.
    #[must_use]
    pub const fn external(mut self) -> Self {
        self.is_external = true;
        self
    }
}

/// A DNS record under a managed domain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Record identifier.
    #[serde(alias = "uid")]
    pub id: String,
    /// Record type (`A`, `CNAME`, `TXT`, `MX`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Subdomain the record applies to; empty for the apex.
    #[serde(default)]
    pub name: String,
    /// Record value.
    pub value: String,
    /// MX priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mx_priority: Option<u16>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp")]
    pub updated: Option<DateTime<Utc>>,
}

/// Request payload for creating a DNS record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordRequest {
    /// Subdomain; empty for the apex.
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Record value.
    pub value: String,
    /// MX priority, required for MX records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mx_priority: Option<u16>,
}

impl DnsRecordRequest {
    /// Build a record request.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            value: value.into(),
            mx_priority: None,
        }
    }

    /// Set the MX priority.
    #[must_use]
    pub const fn with_mx_priority(mut self, priority: u16) -> Self {
        self.mx_priority = Some(priority);
        self
    }
}

/// A TLS certificate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Certificate identifier.
    pub uid: String,
    /// Common names covered.
    #[serde(default)]
    pub cns: Vec<String>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
    /// Expiration time.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp")]
    pub expiration: Option<DateTime<Utc>>,
    /// Whether the platform renews the certificate automatically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
}

/// PEM material for replacing a certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceCertificateRequest {
    /// Certificate chain.
    pub cert: String,
    /// Private key.
    pub key: String,
    /// Optional CA bundle.
    pub ca: Option<String>,
}

impl ReplaceCertificateRequest {
    /// Certificate and key without a CA bundle.
    #[must_use]
    pub fn new(cert: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            cert: cert.into(),
            key: key.into(),
            ca: None,
        }
    }

    /// Attach a CA bundle.
    #[must_use]
    pub fn with_ca(mut self, ca: impl Into<String>) -> Self {
        self.ca = Some(ca.into());
        self
    }
}

/// An alias bound to a deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alias {
    /// Alias identifier.
    pub uid: String,
    /// Alias hostname.
    pub alias: String,
    /// Target deployment identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
}

/// A secret. The value is never returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    /// Secret identifier.
    pub uid: String,
    /// Secret name.
    pub name: String,
    /// Previous name, present after a rename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_name: Option<String>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
}

/// Identifier returned by create operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Created {
    /// New resource identifier.
    pub uid: String,
    /// Creation time.
    #[serde(
        default,
        alias = "createdAt",
        skip_serializing_if = "Option::is_none",
        with = "timestamp"
    )]
    pub created: Option<DateTime<Utc>>,
    /// Identifier of the resource this one replaced, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_id: Option<String>,
}

/// Interpret a JSON timestamp: epoch milliseconds as a number or numeric
/// string, or an RFC 3339 string.
#[must_use]
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::String(s) => s.parse::<i64>().ok().map_or_else(
            || {
                DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            },
            DateTime::from_timestamp_millis,
        ),
        _ => None,
    }
}

mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_i64(dt.timestamp_millis()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(super::parse_timestamp))
    }
}
