//! Secrets. Values are write-only; the API never returns them.

use crate::client::{require, segment};
use crate::models::Secret;
use crate::{NowClient, Result};
use now_core::{MissingParameter, RequestDescription};
use serde_json::json;

impl NowClient {
    /// List secrets.
    pub async fn list_secrets(&self) -> Result<Vec<Secret>> {
        self.executor()
            .execute_as(RequestDescription::get("/now/secrets"), Some("secrets"))
            .await
    }

    /// Store a new secret.
    pub async fn create_secret(&self, name: &str, value: &str) -> Result<Secret> {
        let name = require(name, MissingParameter::Name)?;
        let value = require(value, MissingParameter::Value)?;
        let request = RequestDescription::post("/now/secrets")
            .with_body(json!({ "name": name, "value": value }));
        self.executor().execute_as(request, None).await
    }

    /// Rename a secret.
    pub async fn rename_secret(&self, id: &str, name: &str) -> Result<Secret> {
        let id = require(id, MissingParameter::Id)?;
        let name = require(name, MissingParameter::Name)?;
        let path = format!("/now/secrets/{}", segment(id)?);
        self.executor()
            .execute_as(
                RequestDescription::patch(path).with_body(json!({ "name": name })),
                None,
            )
            .await
    }

    /// Delete a secret.
    pub async fn delete_secret(&self, id: &str) -> Result<()> {
        let id = require(id, MissingParameter::Id)?;
        let path = format!("/now/secrets/{}", segment(id)?);
        self.executor()
            .execute(RequestDescription::delete(path), None)
            .await
            .map(|_| ())
    }
}
