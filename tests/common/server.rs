//! Mock Pergaminos API

use pergaminos_rs::config::ConfigBuilder;
use pergaminos_rs::{ApiClient, ClientConfig, Session};
use std::time::Duration;
use wiremock::MockServer;

/// Token the mock server hands out
pub const TOKEN: &str = "test-token";

/// A wiremock server plus a client configuration pointing at it
pub struct TestApi {
    pub server: MockServer,
    pub config: ClientConfig,
}

impl TestApi {
    /// Server with fast polling so flows finish in milliseconds
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let config = ConfigBuilder::new()
            .base_url(format!("{}/api", server.uri()))
            .process_polling(Duration::from_millis(20), Duration::from_secs(5))
            .reorder_polling(Duration::from_millis(20), Duration::from_secs(5))
            .build()
            .expect("valid test config");
        Self { server, config }
    }

    /// Client without credentials
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config, Session::default()).expect("client")
    }

    /// Client already holding [`TOKEN`]
    pub fn authed_client(&self) -> ApiClient {
        let client = self.client();
        client.session().set_token(TOKEN).expect("token");
        client
    }

    /// Full path of an API route on the mock server
    pub fn api_path(route: &str) -> String {
        format!("/api/{}", route.trim_start_matches('/'))
    }

    /// Requests the server saw, in order
    pub async fn requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}
