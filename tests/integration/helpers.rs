//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use formhub_api::AppState;
use formhub_core::config::AppConfig;
use formhub_database::{MemoryStore, StoreManager};

/// Test application context backed by the in-memory store.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared store state, for direct inspection
    pub store: MemoryStore,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let store = MemoryStore::new();
        let state = AppState::new(config.clone(), StoreManager::from_memory(store.clone()));
        let router = formhub_api::build_app(state, &config.server.cors);

        Self { router, store }
    }

    /// Register a user and return their bearer token
    pub async fn register(&self, username: &str, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                    "confirmPassword": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );
        token_of(&response)
    }

    /// Register a throwaway user and return their token
    pub async fn token(&self) -> String {
        self.register("tester", "tester@example.com", "password123")
            .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.request_raw(method, path, &body_str, token).await
    }

    /// Make an HTTP request with a body sent exactly as given
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body: &str,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a folder and return its id
    pub async fn create_folder(&self, token: &str, name: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        id_of(&response)
    }

    /// Create an unfiled typebot and return its id
    pub async fn create_form(&self, token: &str, name: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/typebots",
                Some(serde_json::json!({ "name": name })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        id_of(&response)
    }

    /// Create a typebot inside a folder and return its id
    pub async fn create_form_in(&self, token: &str, folder_id: &str, name: &str) -> String {
        let response = self
            .request(
                "POST",
                &format!("/api/folders/{folder_id}/typebots"),
                Some(serde_json::json!({ "name": name })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        id_of(&response)
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` payload of a success response
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// The `data.id` of a response, as a string
pub fn id_of(response: &TestResponse) -> String {
    response.data()["id"]
        .as_str()
        .expect("No id in response")
        .to_string()
}

/// The `data.token` of a session response
pub fn token_of(response: &TestResponse) -> String {
    response.data()["token"]
        .as_str()
        .expect("No token in response")
        .to_string()
}
