//! Shared test helpers.

use crate::NowClient;
use async_trait::async_trait;
use now_core::{RequestDescription, Transport, TransportFailure};
use serde_json::Value;
use std::sync::Arc;
use wiremock::MockServer;

mockall::mock! {
    pub Transport {}

    #[async_trait]
    impl Transport for Transport {
        async fn send(&self, request: RequestDescription) -> Result<Value, TransportFailure>;
    }
}

/// Client whose transport fails the test if it is ever called.
pub fn client_without_network() -> NowClient {
    let mut transport = MockTransport::new();
    transport.expect_send().never();
    NowClient::with_transport(Arc::new(transport))
}

/// Client pointed at a wiremock server.
pub fn test_client(server: &MockServer) -> NowClient {
    NowClient::builder()
        .with_config(now_core::config::NowClientConfig::new(server.uri()).unwrap())
        .with_token("test-token")
        .build()
        .unwrap()
}
