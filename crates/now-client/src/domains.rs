//! Domains and DNS records.

use crate::client::{require, require_body, segment};
use crate::models::{AddDomainRequest, Created, DnsRecord, DnsRecordRequest, Domain};
use crate::{NowClient, Result};
use now_core::{MissingParameter, RequestDescription};

impl NowClient {
    /// List domains.
    pub async fn list_domains(&self) -> Result<Vec<Domain>> {
        self.executor()
            .execute_as(RequestDescription::get("/domains"), Some("domains"))
            .await
    }

    /// Register a domain.
    pub async fn add_domain(&self, request: &AddDomainRequest) -> Result<Created> {
        require(&request.name, MissingParameter::Name)?;
        let body = require_body(request)?;
        self.executor()
            .execute_as(RequestDescription::post("/domains").with_body(body), None)
            .await
    }

    /// Remove a domain.
    pub async fn delete_domain(&self, name: &str) -> Result<()> {
        let name = require(name, MissingParameter::Name)?;
        let path = format!("/domains/{}", segment(name)?);
        self.executor()
            .execute(RequestDescription::delete(path), None)
            .await
            .map(|_| ())
    }

    /// List DNS records of a domain.
    pub async fn list_domain_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        let domain = require(domain, MissingParameter::Name)?;
        let path = format!("/domains/{}/records", segment(domain)?);
        self.executor()
            .execute_as(RequestDescription::get(path), Some("records"))
            .await
    }

    /// Create a DNS record under a domain.
    pub async fn add_domain_record(
        &self,
        domain: &str,
        record: &DnsRecordRequest,
    ) -> Result<Created> {
        let domain = require(domain, MissingParameter::Name)?;
        let body = require_body(record)?;
        let path = format!("/domains/{}/records", segment(domain)?);
        self.executor()
            .execute_as(RequestDescription::post(path).with_body(body), None)
            .await
    }

    /// Delete a DNS record.
    pub async fn delete_domain_record(&self, domain: &str, record_id: &str) -> Result<()> {
        let domain = require(domain, MissingParameter::Name)?;
        let record_id = require(record_id, MissingParameter::Id)?;
        let path = format!(
            "/domains/{}/records/{}",
            segment(domain)?,
            segment(record_id)?
        );
        self.executor()
            .execute(RequestDescription::delete(path), None)
            .await
            .map(|_| ())
    }
}
