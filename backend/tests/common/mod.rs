//! Common test utilities for integration tests
//!
//! Builds the full router over the in-memory document store and signs
//! access tokens for generated users.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;
use wellness_coach_backend::{
    auth::JwtService,
    config::{AppConfig, DatabaseConfig, JwtConfig},
    repositories::InMemoryWellnessStore,
    routes,
    services::FitnessProvider,
    state::AppState,
};

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only-32chars";

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub store: Arc<InMemoryWellnessStore>,
    jwt: JwtService,
}

impl TestApp {
    /// App without a fitness provider
    pub fn new() -> Self {
        Self::build(None)
    }

    /// App whose fitness sync is served by `provider`
    pub fn with_fitness(provider: Arc<dyn FitnessProvider>) -> Self {
        Self::build(Some(provider))
    }

    fn build(fitness: Option<Arc<dyn FitnessProvider>>) -> Self {
        let config = test_config();
        let store = Arc::new(InMemoryWellnessStore::new());
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry_secs);

        let state = AppState::new(config, store.clone(), fitness);
        let app = routes::create_router(state);

        Self { app, store, jwt }
    }

    /// A fresh user id and a valid access token for it
    pub fn create_test_user(&self) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        let token = self
            .jwt
            .generate_access_token(user_id)
            .expect("Failed to sign test token");
        (user_id, token)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.send("GET", path, None, None).await
    }

    /// Make an authenticated GET request
    pub async fn get_auth(&self, path: &str, token: &str) -> (StatusCode, String) {
        self.send("GET", path, None, Some(token)).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.send("POST", path, Some(body), None).await
    }

    /// Make an authenticated POST request with JSON body
    pub async fn post_auth(&self, path: &str, body: &str, token: &str) -> (StatusCode, String) {
        self.send("POST", path, Some(body), Some(token)).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<&str>,
        token: Option<&str>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(path);
        if body.is_some() {
            builder = builder.header("Content-Type", "application/json");
        }
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_secs: 3600,
        },
        ..AppConfig::default()
    }
}
