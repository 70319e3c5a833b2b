//! End-to-end behaviour of the public client against a mock API.

use now_client::{Error, NormalizedError, NowClient};
use now_core::config::NowClientConfig;
use now_core::{RequestDescription, Transport, TransportFailure};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Counts calls and always answers with the same body.
struct CountingTransport {
    calls: AtomicUsize,
    response: Value,
}

#[async_trait::async_trait]
impl Transport for CountingTransport {
    async fn send(&self, _request: RequestDescription) -> Result<Value, TransportFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

#[tokio::test]
async fn custom_transport_is_used_for_every_call() {
    let transport = Arc::new(CountingTransport {
        calls: AtomicUsize::new(0),
        response: json!({"secrets": []}),
    });
    let client = NowClient::builder().with_transport(transport.clone()).build().unwrap();

    assert!(client.list_secrets().await.unwrap().is_empty());
    assert!(client.create_secret("", "value").await.is_err());
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn executor_returns_raw_envelope_without_selector() {
    let transport = Arc::new(CountingTransport {
        calls: AtomicUsize::new(0),
        response: json!({"deployments": [{"uid": "A"}, {"uid": "B"}]}),
    });
    let client = NowClient::with_transport(transport);

    let whole = client
        .executor()
        .execute(RequestDescription::get("/now/deployments"), None)
        .await
        .unwrap();
    assert_eq!(whole, json!({"deployments": [{"uid": "A"}, {"uid": "B"}]}));

    let selected = client
        .executor()
        .execute(RequestDescription::get("/now/deployments"), Some("deployments"))
        .await
        .unwrap();
    assert_eq!(selected, json!([{"uid": "A"}, {"uid": "B"}]));
}

#[tokio::test]
async fn configured_origin_and_token_are_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/now/aliases"))
        .and(header("authorization", "Bearer configured-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"aliases": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = NowClient::builder()
        .with_config(NowClientConfig::new(server.uri()).unwrap().with_timeout(5))
        .with_token("configured-token")
        .build()
        .unwrap();

    assert!(client.list_aliases().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_api_yields_message_error() {
    let client = NowClient::builder()
        .with_config(NowClientConfig::new("http://127.0.0.1:1").unwrap())
        .with_token("token")
        .build()
        .unwrap();

    let err = client.list_deployments().await.unwrap_err();
    match err {
        Error::Remote(NormalizedError::Message(message)) => assert!(!message.is_empty()),
        other => panic!("expected a message error, got {other:?}"),
    }
}
