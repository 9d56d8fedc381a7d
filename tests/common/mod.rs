#![allow(dead_code)]

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use neurocrypt::models::Settings;
use neurocrypt::{router, AppState};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// How the stub completion provider answers every request.
#[derive(Debug, Clone)]
pub enum Reply {
    Content(String),
    /// Verbatim response body, for exercising unusual completion shapes.
    Raw(Value),
    Status(u16),
    Slow(Duration, String),
}

impl Reply {
    pub fn text(content: &str) -> Self {
        Self::Content(content.to_string())
    }
}

#[derive(Clone)]
struct StubState {
    reply: Reply,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<Value>>>,
}

pub struct StubProvider {
    pub base_url: String,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<Value>>>,
}

impl StubProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<Value> {
        self.last_request.lock().unwrap().clone()
    }
}

fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

async fn respond(State(stub): State<StubState>, Json(body): Json<Value>) -> Response {
    stub.calls.fetch_add(1, Ordering::SeqCst);
    *stub.last_request.lock().unwrap() = Some(body);
    match stub.reply {
        Reply::Content(content) => Json(completion_body(&content)).into_response(),
        Reply::Raw(body) => Json(body).into_response(),
        Reply::Status(code) => (
            StatusCode::from_u16(code).unwrap(),
            "provider exploded",
        )
            .into_response(),
        Reply::Slow(delay, content) => {
            tokio::time::sleep(delay).await;
            Json(completion_body(&content)).into_response()
        }
    }
}

pub async fn stub_provider(reply: Reply) -> StubProvider {
    let calls = Arc::new(AtomicUsize::new(0));
    let last_request = Arc::new(Mutex::new(None));
    let state = StubState {
        reply,
        calls: calls.clone(),
        last_request: last_request.clone(),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(respond))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubProvider {
        base_url: format!("http://{addr}/v1"),
        calls,
        last_request,
    }
}

/// Settings pointing at a fresh database in `dir`. Without a provider the API key
/// is left empty, so every AI call resolves to its placeholder.
pub fn test_settings(dir: &TempDir, provider: Option<&StubProvider>) -> Settings {
    let mut settings = Settings::default();
    settings.database.url = dir.path().join("neurocrypt-test.db").display().to_string();
    settings.ai.timeout_secs = 2;
    match provider {
        Some(provider) => {
            settings.ai.api_key = "test-key".to_string();
            settings.ai.base_url = provider.base_url.clone();
        }
        None => {
            settings.ai.api_key = String::new();
            settings.ai.base_url = "http://127.0.0.1:9/v1".to_string();
        }
    }
    settings
}

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub state: AppState,
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self.client.post(self.url(path)).json(&body).send().await.unwrap();
        decode(response).await
    }

    pub async fn put_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self.client.put(self.url(path)).json(&body).send().await.unwrap();
        decode(response).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        decode(response).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let response = self.client.delete(self.url(path)).send().await.unwrap();
        decode(response).await
    }
}

async fn decode(response: reqwest::Response) -> (StatusCode, Value) {
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    let text = response.text().await.unwrap();
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
    (status, body)
}

pub async fn spawn_app_with(dir: TempDir, settings: Settings) -> TestApp {
    let state = AppState::initialize(settings).await.unwrap();
    let app = router(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        state,
        _dir: dir,
    }
}

pub async fn spawn_app(provider: Option<&StubProvider>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings(&dir, provider);
    spawn_app_with(dir, settings).await
}
