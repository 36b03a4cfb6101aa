use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use storygen_api::config::ServerConfig;
use storygen_api::router::build_app_router;
use storygen_api::state::AppState;
use storygen_gemini::{GenerationError, StoryGenerator};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        generation_timeout_secs: 5,
        gemini_base_url: "http://127.0.0.1:0".to_string(),
        gemini_model: "gemini-1.5-flash".to_string(),
        secrets_file: "secrets.json".to_string(),
        api_key_path: "api_key".to_string(),
    }
}

/// What the stub provider does when invoked.
pub enum StubOutcome {
    /// Return this exact story text.
    Story(String),
    /// Fail with a connectivity fault.
    NetworkFault,
    /// Fail with an auth fault.
    AuthFault,
    /// Fail with a content-policy rejection.
    Rejected,
    /// Return a response with no text payload.
    Empty,
}

/// In-memory stand-in for the Gemini client: no network, programmable
/// outcome, call counting, and prompt capture.
pub struct StubGenerator {
    outcome: StubOutcome,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubGenerator {
    pub fn new(outcome: StubOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// How many times `generate` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The prompt from the most recent invocation.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        match &self.outcome {
            StubOutcome::Story(text) => Ok(text.clone()),
            StubOutcome::NetworkFault => {
                Err(GenerationError::Network("connection refused".to_string()))
            }
            StubOutcome::AuthFault => Err(GenerationError::Auth(
                "API key not valid. Please pass a valid API key.".to_string(),
            )),
            StubOutcome::Rejected => Err(GenerationError::ProviderRejected(
                "prompt was blocked (SAFETY)".to_string(),
            )),
            StubOutcome::Empty => Err(GenerationError::EmptyResponse),
        }
    }
}

/// Build the full application router around the given stub provider.
///
/// Uses [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app_with(stub: Arc<StubGenerator>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        generator: stub,
    };
    build_app_router(state, &config)
}

/// Build a test app with a fresh stub; use when the test does not need to
/// inspect the stub afterwards.
pub fn build_test_app(outcome: StubOutcome) -> Router {
    build_test_app_with(Arc::new(StubGenerator::new(outcome)))
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
