//! Aliases binding hostnames to deployments.

use crate::client::{require, segment};
use crate::models::{Alias, Created};
use crate::{NowClient, Result};
use now_core::{MissingParameter, RequestDescription};
use serde_json::json;

impl NowClient {
    /// List every alias on the account.
    pub async fn list_aliases(&self) -> Result<Vec<Alias>> {
        self.executor()
            .execute_as(RequestDescription::get("/now/aliases"), Some("aliases"))
            .await
    }

    /// List aliases pointing at one deployment.
    pub async fn list_deployment_aliases(&self, id: &str) -> Result<Vec<Alias>> {
        let id = require(id, MissingParameter::Id)?;
        let path = format!("/now/deployments/{}/aliases", segment(id)?);
        self.executor()
            .execute_as(RequestDescription::get(path), Some("aliases"))
            .await
    }

    /// Point `alias` at a deployment.
    pub async fn create_alias(&self, id: &str, alias: &str) -> Result<Created> {
        let id = require(id, MissingParameter::Id)?;
        let alias = require(alias, MissingParameter::Alias)?;
        let path = format!("/now/deployments/{}/aliases", segment(id)?);
        self.executor()
            .execute_as(
                RequestDescription::post(path).with_body(json!({ "alias": alias })),
                None,
            )
            .await
    }

    /// Delete an alias by identifier.
    pub async fn delete_alias(&self, id: &str) -> Result<()> {
        let id = require(id, MissingParameter::Id)?;
        let path = format!("/now/aliases/{}", segment(id)?);
        self.executor()
            .execute(RequestDescription::delete(path), None)
            .await
            .map(|_| ())
    }
}
