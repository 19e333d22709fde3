#![allow(dead_code)]

use std::sync::{Arc, Once};

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use kanban_api_rust::auth::{generate_jwt, Access, Claims};
use kanban_api_rust::authorization::ProjectRole;
use kanban_api_rust::config::AppConfig;
use kanban_api_rust::database::MemoryStore;
use kanban_api_rust::server::{app, AppState};

pub const MANAGER_ID: i64 = 1;
pub const VIEWER_ID: i64 = 2;
pub const STRANGER_ID: i64 = 3;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Router over an in-memory store holding one default project with a
/// manager and a viewer
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub project_id: i64,
    secret: String,
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        init_tracing();

        let (store, project_id) = MemoryStore::with_default_project().await?;
        let store = Arc::new(store);
        store.set_role(project_id, MANAGER_ID, ProjectRole::Manager).await;
        store.set_role(project_id, VIEWER_ID, ProjectRole::Viewer).await;

        let mut config = AppConfig::development();
        config.security.jwt_secret = "integration-test-secret".to_string();
        config.rpc.max_batch_size = 5;
        let secret = config.security.jwt_secret.clone();

        let router = app(AppState::in_memory(config, store.clone()));

        Ok(Self {
            router,
            store,
            project_id,
            secret,
        })
    }

    pub fn token(&self, user_id: i64, access: Access) -> String {
        let claims = Claims::new(user_id, format!("user{}", user_id), access, 1);
        generate_jwt(&claims, &self.secret).expect("sign test token")
    }

    pub fn manager(&self) -> String {
        self.token(MANAGER_ID, Access::User)
    }

    pub fn viewer(&self) -> String {
        self.token(VIEWER_ID, Access::User)
    }

    pub fn stranger(&self) -> String {
        self.token(STRANGER_ID, Access::User)
    }

    pub fn app_token(&self) -> String {
        self.token(0, Access::App)
    }

    pub async fn get(&self, path: &str) -> Result<(StatusCode, Option<Value>)> {
        let request = Request::builder().method(Method::GET).uri(path).body(Body::empty())?;
        self.send(request).await
    }

    /// POST a raw body to /jsonrpc
    pub async fn post_raw(&self, token: Option<&str>, body: impl Into<Body>) -> Result<(StatusCode, Option<Value>)> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/jsonrpc")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body: Body = body.into();
        self.send(builder.body(body)?).await
    }

    pub async fn post(&self, token: Option<&str>, body: Value) -> Result<(StatusCode, Option<Value>)> {
        self.post_raw(token, serde_json::to_vec(&body)?).await
    }

    /// Single request; returns the response object
    pub async fn call(&self, token: &str, method: &str, params: Value) -> Result<Value> {
        let (status, body) = self
            .post(
                Some(token),
                serde_json::json!({
                    "jsonrpc": "2.0",
                    "method": method,
                    "params": params,
                    "id": 1
                }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "unexpected status {}", status);
        body.ok_or_else(|| anyhow::anyhow!("empty response body"))
    }

    async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Option<Value>)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&bytes)?)
        };
        Ok((status, body))
    }
}
