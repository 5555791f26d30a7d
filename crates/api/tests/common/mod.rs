#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use bitlings_api::config::ServerConfig;
use bitlings_api::router::build_app_router;
use bitlings_api::state::AppState;
use bitlings_core::generation::{parse_generator_output, Normalized};
use bitlings_db::MemoryStore;
use bitlings_generator::{Generator, GeneratorError, StatsRequest};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const DEFAULT_USER: &str = "demo-user-id";

/// Canned model output: two types, in-range stats, no moves.
pub const CANNED_STATS: &str = r#"{
    "types": ["fire", "ghost"],
    "stats": {"hp": 55, "attack": 80, "defense": 45, "speed": 90},
    "description": "A smouldering wisp.",
    "behavior": "Hides in chimneys."
}"#;

/// Build a test `ServerConfig` with safe defaults.
///
/// Admin routes are enabled with [`ADMIN_TOKEN`]; demo data is off so every
/// test starts from an empty store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        approval_threshold: 10,
        default_user_id: DEFAULT_USER.to_string(),
        admin_token: Some(ADMIN_TOKEN.to_string()),
        seed_demo_data: false,
    }
}

/// Generator that answers from memory and counts calls.
#[derive(Default)]
pub struct FakeGenerator {
    pub stats_content: Option<String>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn canned() -> Self {
        Self {
            stats_content: Some(CANNED_STATS.to_string()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate_stats(&self, _request: &StatsRequest) -> Result<Normalized, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GeneratorError::Api {
                status: 503,
                body: "model overloaded".into(),
            });
        }
        Ok(parse_generator_output(
            self.stats_content.as_deref().unwrap_or("{}"),
        ))
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GeneratorError::EmptyResponse("image URL"));
        }
        Ok(format!("https://images.test/{}.png", prompt.len()))
    }
}

/// A router plus handles on its store and generator.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub generator: Arc<FakeGenerator>,
    pub state: AppState,
}

impl TestApp {
    /// A fresh clone of the router for one `oneshot` request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router over an empty [`MemoryStore`] and a
/// [`FakeGenerator::canned`] generator.
pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config(), FakeGenerator::canned())
}

/// Build the full application router with the given config and generator.
///
/// Uses [`build_app_router`], so tests exercise the same middleware stack
/// (CORS, request ID, timeout, tracing, panic recovery) as production.
pub fn build_test_app_with(config: ServerConfig, generator: FakeGenerator) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let generator = Arc::new(generator);

    let state = AppState {
        store: store.clone(),
        generator: generator.clone(),
        config: Arc::new(config.clone()),
        rules: Arc::new(config.game_rules()),
    };

    TestApp {
        router: build_app_router(state.clone(), &config),
        store,
        generator,
        state,
    }
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    get_with_headers(app, uri, &[]).await
}

pub async fn get_with_headers(app: Router, uri: &str, headers: &[(&str, &str)]) -> Response {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: &serde_json::Value,
    headers: &[(&str, &str)],
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, &body, &[]).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, &body, &[]).await
}

/// `POST /api/v1/bitlings` with a minimal valid body; returns the new id.
pub async fn submit_bitling(app: Router, name: &str, types: &[&str]) -> String {
    let body = serde_json::json!({
        "name": name,
        "prompt": format!("{name} is a test creature"),
        "imageUrl": format!("https://images.test/{name}.png"),
        "types": types,
    });
    let response = post_json(app, "/api/v1/bitlings", body).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// `PUT /api/v1/admin/bitlings/{id}/status` with the admin token.
pub async fn admin_set_status(app: Router, id: &str, status: &str) -> Response {
    send_json(
        app,
        Method::PUT,
        &format!("/api/v1/admin/bitlings/{id}/status"),
        &serde_json::json!({ "status": status }),
        &[("x-admin-token", ADMIN_TOKEN)],
    )
    .await
}

/// `POST /api/v1/vote` from the voter at `ip`.
pub async fn vote(app: Router, id: &str, value: i64, ip: &str) -> Response {
    send_json(
        app,
        Method::POST,
        "/api/v1/vote",
        &serde_json::json!({ "bitlingId": id, "vote": value }),
        &[("x-forwarded-for", ip)],
    )
    .await
}
