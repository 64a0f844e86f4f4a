//! # Web Test Infrastructure
//!
//! Starts the full application on an ephemeral port and provides a thin
//! reqwest wrapper with per-role credentials.

use std::net::SocketAddr;

use serde_json::Value;
use tokio::task::JoinHandle;

use storefront_core::config::{ApiKeyConfig, StorefrontConfig};
use storefront_core::web::build_router;
use storefront_core::AppState;

/// Bearer key configured with catalog administration rights.
pub const ADMIN_KEY: &str = "test-admin-key";
/// Bearer key configured without administration rights.
pub const MEMBER_KEY: &str = "test-member-key";

/// Configuration used by the test server: auth enabled, one admin key and one
/// non-admin key.
pub fn test_config() -> StorefrontConfig {
    let mut config = StorefrontConfig::default();
    config.web.bind_address = "127.0.0.1:0".to_string();
    config.auth.enabled = true;
    config.auth.api_keys = vec![
        ApiKeyConfig {
            key: ADMIN_KEY.to_string(),
            description: "Test admin".to_string(),
            admin: true,
        },
        ApiKeyConfig {
            key: MEMBER_KEY.to_string(),
            description: "Test member".to_string(),
            admin: false,
        },
    ];
    config
}

/// A running application instance bound to an ephemeral port.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with the default test configuration.
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with a custom configuration.
    pub async fn start_with_config(config: StorefrontConfig) -> anyhow::Result<Self> {
        let state = AppState::new(config);
        let router = build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self { addr, handle })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the server task.
    pub async fn shutdown(self) {
        self.handle.abort();
    }
}

/// HTTP client for the test server, optionally carrying a bearer key.
pub struct WebTestClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WebTestClient {
    /// Client presenting no credentials.
    pub fn anonymous(server: &TestServer) -> Self {
        Self::with_key(server, None)
    }

    /// Client presenting the admin key.
    pub fn admin(server: &TestServer) -> Self {
        Self::with_key(server, Some(ADMIN_KEY))
    }

    /// Client presenting the non-admin key.
    pub fn member(server: &TestServer) -> Self {
        Self::with_key(server, Some(MEMBER_KEY))
    }

    pub fn with_key(server: &TestServer, api_key: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: server.base_url(),
            api_key: api_key.map(String::from),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        builder
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.request(reqwest::Method::GET, path).send().await
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Result<reqwest::Response> {
        self.request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await
    }

    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Result<reqwest::Response> {
        self.request(reqwest::Method::PUT, path)
            .json(body)
            .send()
            .await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> reqwest::Result<reqwest::Response> {
        self.request(reqwest::Method::PATCH, path)
            .json(body)
            .send()
            .await
    }

    pub async fn delete(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.request(reqwest::Method::DELETE, path).send().await
    }

    /// Send raw (possibly malformed) bytes as a JSON POST body.
    pub async fn post_raw(&self, path: &str, body: &str) -> reqwest::Result<reqwest::Response> {
        self.request(reqwest::Method::POST, path)
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
    }
}

/// Create a collection as admin and return its id.
pub async fn seed_collection(admin: &WebTestClient) -> i64 {
    let response = admin
        .post("/store/collections/", &serde_json::json!({"title": "seeded"}))
        .await
        .expect("Failed to create collection");
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse collection");
    body["id"].as_i64().expect("Collection id should be an integer")
}

/// Create a product in the given collection as admin and return its body.
pub async fn seed_product(admin: &WebTestClient, collection_id: i64) -> Value {
    let payload = serde_json::json!({
        "title": "seeded product",
        "description": "aa",
        "slug": "-",
        "inventory": 10,
        "unit_price": 5.5,
        "collection": collection_id
    });
    let response = admin
        .post("/store/products/", &payload)
        .await
        .expect("Failed to create product");
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    response.json().await.expect("Failed to parse product")
}
