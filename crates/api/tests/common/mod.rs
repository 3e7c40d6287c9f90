#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use quizbank_api::auth::jwt::{generate_access_token, JwtConfig};
use quizbank_api::auth::password::hash_password;
use quizbank_api::config::ServerConfig;
use quizbank_api::router::build_app_router;
use quizbank_api::state::AppState;
use quizbank_core::user::{CreateUser, User};
use quizbank_db::repositories::UserRepo;
use quizbank_db::store::{DocumentStore, MemoryStore};

/// Password given to every seeded user.
pub const TEST_PASSWORD: &str = "test_password_123";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:3000")],
        request_timeout_secs: 30,
        database_url: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_mins: 60,
        },
        bootstrap_admin: None,
    }
}

/// An application over a fresh in-memory store.
///
/// The router is rebuilt on each [`TestApp::router`] call, but the store is
/// shared, so state carries across requests.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub config: ServerConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::default()),
            config: test_config(),
        }
    }

    pub fn router(&self) -> Router {
        let store: Arc<dyn DocumentStore> = self.store.clone();
        let state = AppState::new(store, self.config.clone());
        build_app_router(state, &self.config)
    }

    /// Insert a user directly into the store.
    pub async fn seed_user(&self, username: &str, role: &str) -> User {
        let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
        UserRepo::create(
            self.store.as_ref(),
            &CreateUser {
                username: username.to_string(),
                first_name: None,
                last_name: None,
                email: Some(format!("{username}@test.com")),
                password_hash,
                role: role.to_string(),
            },
        )
        .await
        .expect("user creation should succeed")
    }

    /// Seed a user and return a valid access token for them.
    pub async fn token_for(&self, username: &str, role: &str) -> (User, String) {
        let user = self.seed_user(username, role).await;
        let token = generate_access_token(user.id, &user.role, &self.config.jwt)
            .expect("token generation should succeed");
        (user, token)
    }
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
