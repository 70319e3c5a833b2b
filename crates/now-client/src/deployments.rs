//! Deployments and deployment files.

use crate::client::{require, require_body, segment};
use crate::models::{Deployment, DeploymentFile};
use crate::{NowClient, Result};
use now_core::{MissingParameter, RequestDescription};
use serde::Serialize;
use serde_json::Value;

impl NowClient {
    /// List all deployments.
    pub async fn list_deployments(&self) -> Result<Vec<Deployment>> {
        self.executor()
            .execute_as(RequestDescription::get("/now/deployments"), Some("deployments"))
            .await
    }

    /// Fetch a single deployment.
    pub async fn get_deployment(&self, id: &str) -> Result<Deployment> {
        let id = require(id, MissingParameter::Id)?;
        let path = format!("/now/deployments/{}", segment(id)?);
        self.executor()
            .execute_as(RequestDescription::get(path), None)
            .await
    }

    /// Create a deployment from a raw payload (file contents keyed by name,
    /// plus options such as `package` or `deploymentType`).
    pub async fn create_deployment<B>(&self, body: &B) -> Result<Deployment>
    where
        B: Serialize + ?Sized,
    {
        let body = require_body(body)?;
        self.executor()
            .execute_as(RequestDescription::post("/now/deployments").with_body(body), None)
            .await
    }

    /// Delete a deployment.
    pub async fn delete_deployment(&self, id: &str) -> Result<()> {
        let id = require(id, MissingParameter::Id)?;
        let path = format!("/now/deployments/{}", segment(id)?);
        self.executor()
            .execute(RequestDescription::delete(path), None)
            .await
            .map(|_| ())
    }

    /// List the file tree of a deployment.
    pub async fn list_files(&self, id: &str) -> Result<Vec<DeploymentFile>> {
        let id = require(id, MissingParameter::Id)?;
        let path = format!("/now/deployments/{}/files", segment(id)?);
        self.executor()
            .execute_as(RequestDescription::get(path), None)
            .await
    }

    /// Fetch the contents of a deployment file.
    ///
    /// Files whose contents are valid JSON come back re-serialized, so the
    /// text is not byte-exact: whitespace and key order may differ from the
    /// deployed file.
    pub async fn get_file(&self, id: &str, file_id: &str) -> Result<String> {
        let id = require(id, MissingParameter::Id)?;
        let file_id = require(file_id, MissingParameter::FileId)?;
        let path = format!(
            "/now/deployments/{}/files/{}",
            segment(id)?,
            segment(file_id)?
        );

        let contents = self
            .executor()
            .execute(RequestDescription::get(path), None)
            .await?;

        Ok(match contents {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{client_without_network, test_client};
    use crate::{Error, MissingParameter, NormalizedError};
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn list_deployments_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/now/deployments"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "deployments": [
                    {"uid": "dpl_a", "name": "app", "url": "app-a.now.sh", "created": "1463537946000"},
                    {"uid": "dpl_b", "name": "app", "url": "app-b.now.sh", "created": "1463537947000"}
                ]
            })))
            .mount(&server)
            .await;

        let deployments = test_client(&server).list_deployments().await.unwrap();
        assert_eq!(deployments.len(), 2);
        assert_eq!(deployments[0].uid, "dpl_a");
        assert_eq!(deployments[1].url.as_deref(), Some("app-b.now.sh"));
        assert!(deployments[0].created.is_some());
    }

    #[tokio::test]
    async fn get_deployment_returns_whole_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/now/deployments/dpl_a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uid": "dpl_a",
                "host": "app-a.now.sh",
                "state": "READY"
            })))
            .mount(&server)
            .await;

        let deployment = test_client(&server).get_deployment("dpl_a").await.unwrap();
        assert_eq!(deployment.uid, "dpl_a");
        assert_eq!(deployment.state.as_deref(), Some("READY"));
    }

    #[tokio::test]
    async fn get_deployment_surfaces_structured_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/now/deployments/dpl_gone"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "err": {"code": "not_found", "message": "The deployment was not found"}
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .get_deployment("dpl_gone")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::Remote(NormalizedError::Structured(json!({
                "code": "not_found",
                "message": "The deployment was not found"
            })))
        );
        assert_eq!(err.code(), "not_found");
    }

    #[tokio::test]
    async fn create_deployment_posts_body() {
        let server = MockServer::start().await;
        let body = json!({
            "package": {"name": "app"},
            "index.js": "require('http').createServer().listen(3000)"
        });
        Mock::given(method("POST"))
            .and(path("/now/deployments"))
            .and(body_json(body.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "deploymentId": "dpl_new",
                "url": "app-new.now.sh"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let deployment = test_client(&server).create_deployment(&body).await.unwrap();
        assert_eq!(deployment.uid, "dpl_new");
    }

    #[tokio::test]
    async fn delete_deployment_ignores_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/now/deployments/dpl_a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uid": "dpl_a",
                "state": "DELETED"
            })))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server).delete_deployment("dpl_a").await.unwrap();
    }

    #[tokio::test]
    async fn list_files_returns_tree() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/now/deployments/dpl_a/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "package.json", "type": "file", "uid": "f1"},
                {"name": "src", "type": "directory", "children": []}
            ])))
            .mount(&server)
            .await;

        let files = test_client(&server).list_files("dpl_a").await.unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[1].is_directory());
    }

    #[tokio::test]
    async fn get_file_returns_raw_contents() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/now/deployments/dpl_a/files/f1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("console.log('hi')\n"))
            .mount(&server)
            .await;

        let contents = test_client(&server).get_file("dpl_a", "f1").await.unwrap();
        assert_eq!(contents, "console.log('hi')\n");
    }

    #[tokio::test]
    async fn missing_parameters_never_reach_the_network() {
        let client = client_without_network();

        let err = client.get_deployment("").await.unwrap_err();
        assert_eq!(err, Error::MissingParameter(MissingParameter::Id));
        assert_eq!(err.detail().code, "missing_id");
        assert_eq!(err.detail().message, "Missing `id` parameter");

        assert_eq!(
            client.delete_deployment("").await.unwrap_err(),
            Error::MissingParameter(MissingParameter::Id)
        );
        assert_eq!(
            client.list_files("").await.unwrap_err(),
            Error::MissingParameter(MissingParameter::Id)
        );
        assert_eq!(
            client.get_file("", "f1").await.unwrap_err(),
            Error::MissingParameter(MissingParameter::Id)
        );

        let err = client.get_file("dpl_a", "").await.unwrap_err();
        assert_eq!(err, Error::MissingParameter(MissingParameter::FileId));
        assert_eq!(err.detail().message, "Missing `fileId` parameter");

        let err = client.create_deployment(&Value::Null).await.unwrap_err();
        assert_eq!(err, Error::MissingParameter(MissingParameter::Body));
        assert_eq!(err.detail().message, "Missing `body` parameter");
    }

    #[tokio::test]
    async fn dot_identifiers_never_reach_the_network() {
        let client = client_without_network();

        assert!(matches!(
            client.delete_deployment("..").await.unwrap_err(),
            Error::InvalidEndpoint(_)
        ));
        assert!(matches!(
            client.get_file("dpl_a", ".").await.unwrap_err(),
            Error::InvalidEndpoint(_)
        ));
    }
}
