//! TLS certificates, keyed by common name.

use crate::client::{require, segment};
use crate::models::{parse_timestamp, Certificate, Created, ReplaceCertificateRequest};
use crate::{NowClient, Result};
use chrono::{DateTime, Utc};
use now_core::{MissingParameter, RequestDescription};
use serde_json::{json, Value};

impl NowClient {
    /// List all certificates.
    pub async fn list_certificates(&self) -> Result<Vec<Certificate>> {
        self.executor()
            .execute_as(RequestDescription::get("/now/certs"), Some("certs"))
            .await
    }

    /// List certificates for one common name.
    pub async fn get_certificates(&self, cn: &str) -> Result<Vec<Certificate>> {
        let cn = require(cn, MissingParameter::CommonName)?;
        let path = format!("/now/certs/{}", segment(cn)?);
        self.executor()
            .execute_as(RequestDescription::get(path), Some("certs"))
            .await
    }

    /// Issue a new certificate for a common name.
    pub async fn create_certificate(&self, cn: &str) -> Result<Created> {
        let cn = require(cn, MissingParameter::CommonName)?;
        let request = RequestDescription::post("/now/certs").with_body(json!({ "domains": [cn] }));
        self.executor().execute_as(request, None).await
    }

    /// Renew the certificate for a common name.
    pub async fn renew_certificate(&self, cn: &str) -> Result<Created> {
        let cn = require(cn, MissingParameter::CommonName)?;
        let request = RequestDescription::post("/now/certs")
            .with_body(json!({ "domains": [cn], "renew": true }));
        self.executor().execute_as(request, None).await
    }

    /// Replace the certificate for a common name with caller-supplied PEM
    /// material. Returns the creation time of the stored certificate.
    pub async fn replace_certificate(
        &self,
        cn: &str,
        replacement: &ReplaceCertificateRequest,
    ) -> Result<Option<DateTime<Utc>>> {
        let cn = require(cn, MissingParameter::CommonName)?;

        let mut body = json!({
            "domains": [cn],
            "cert": replacement.cert,
            "key": replacement.key,
        });
        if let (Some(ca), Value::Object(map)) = (&replacement.ca, &mut body) {
            map.insert("ca".to_string(), Value::String(ca.clone()));
        }

        let created = self
            .executor()
            .execute(RequestDescription::put("/now/certs").with_body(body), Some("created"))
            .await?;
        Ok(parse_timestamp(&created))
    }

    /// Delete the certificate for a common name.
    pub async fn delete_certificate(&self, cn: &str) -> Result<()> {
        let cn = require(cn, MissingParameter::CommonName)?;
        let path = format!("/now/certs/{}", segment(cn)?);
        self.executor()
            .execute(RequestDescription::delete(path), None)
            .await
            .map(|_| ())
    }
}
