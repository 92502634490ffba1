// Common test utilities and helper structs
// Shared across all test files to avoid duplication
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use prepdeck_backend::{
    app::AppState,
    db::{create_diesel_pool, DieselDatabaseConfig, DieselPool},
    migrations,
    services::{SubscriptionService, TokenService},
};
use serde::Serialize;
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub diesel_pool: DieselPool,
    pub token_service: Arc<TokenService>,
}

impl TestApp {
    /// Send a POST request
    pub fn post(&self, uri: &str) -> TestRequest<'_> {
        TestRequest::new(self, "POST", uri)
    }

    /// Send a GET request
    pub fn get(&self, uri: &str) -> TestRequest<'_> {
        TestRequest::new(self, "GET", uri)
    }

    /// Send a DELETE request
    pub fn delete(&self, uri: &str) -> TestRequest<'_> {
        TestRequest::new(self, "DELETE", uri)
    }
}

/// Test request builder
pub struct TestRequest<'a> {
    app: &'a TestApp,
    method: String,
    uri: String,
    headers: Vec<(String, String)>,
    body: Body,
}

impl<'a> TestRequest<'a> {
    fn new(app: &'a TestApp, method: &str, uri: &str) -> Self {
        Self {
            app,
            method: method.to_string(),
            uri: uri.to_string(),
            headers: Vec::new(),
            body: Body::empty(),
        }
    }

    /// Add JSON body to request
    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        self.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        self.body = Body::from(serde_json::to_vec(body).unwrap());
        self
    }

    /// Add a header to the request
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Authenticate the request with a bearer token
    pub fn bearer(self, token: &str) -> Self {
        self.header("authorization", &format!("Bearer {}", token))
    }

    /// Send the request
    pub async fn send(self) -> TestResponse {
        let mut builder = Request::builder().method(self.method.as_str()).uri(&self.uri);
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }
        let request = builder.body(self.body).unwrap();

        let response = self.app.app.clone().oneshot(request).await.unwrap();

        TestResponse { response }
    }
}

/// Test response wrapper
pub struct TestResponse {
    response: Response<Body>,
}

impl TestResponse {
    /// Get status code
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// Get a response header value
    pub fn header(&self, name: &str) -> Option<String> {
        self.response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    }

    /// Parse JSON response
    pub async fn json<T: serde::de::DeserializeOwned>(self) -> T {
        let body = axum::body::to_bytes(self.response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }
}

/// Setup test application with all dependencies
///
/// Requires a reachable test database (DATABASE_URL or DB_* in .env.test);
/// migrations are applied on first setup.
pub async fn setup_test_app() -> TestApp {
    // Load test environment
    dotenv::from_filename(".env.test").ok();
    dotenv::dotenv().ok();

    // Initialize test database pool
    let db_config = DieselDatabaseConfig::default();
    let max_connections = db_config.max_connections;
    let diesel_pool = create_diesel_pool(db_config).await.unwrap();

    // Self-provision the schema
    migrations::run_migrations(&diesel_pool)
        .await
        .expect("Failed to run migrations for tests");

    let config = prepdeck_backend::app_config::config();

    let token_service = Arc::new(TokenService::from_env());
    let subscription_service = Arc::new(SubscriptionService::new());

    let app_state = AppState {
        config: Arc::new(config.clone()),
        diesel_pool: diesel_pool.clone(),
        token_service: token_service.clone(),
        subscription_service,
        max_connections,
    };

    let app = prepdeck_backend::build_router(app_state);

    TestApp {
        app,
        diesel_pool,
        token_service,
    }
}

/// A unique email per test run to keep tests independent
pub fn unique_email(prefix: &str) -> String {
    format!("{}+{}@example.com", prefix, Uuid::new_v4().simple())
}

/// Standard signup body with the given email
pub fn signup_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "firstName": "Test",
        "lastName": "Student",
        "email": email,
        "password": "sup3rsecret",
        "school": "Test University",
        "year": "2027"
    })
}

/// Sign up a fresh user through the API; returns (email, token)
pub async fn signup_test_user(app: &TestApp, prefix: &str) -> (String, String) {
    let email = unique_email(prefix);
    let response = app
        .post("/api/auth/signup")
        .json(&signup_body(&email))
        .send()
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await;
    let token = body["data"]["token"].as_str().unwrap().to_string();
    (email, token)
}
