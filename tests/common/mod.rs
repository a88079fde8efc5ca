//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    http::{header, HeaderMap, StatusCode, Uri},
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;

use translate_gateway::{
    GatewayConfig, HttpServer, Shutdown, Translation, TranslationRequest, Translator,
    TranslatorError,
};

pub const API_KEY: &str = "test-key";

/// Config that passes validation and points the translator at `base_url`.
pub fn test_config(base_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.auth.api_key = API_KEY.into();
    config.translator.base_url = base_url.into();
    config.translator.account_id = "acct".into();
    config.translator.api_token = "upstream-token".into();
    config.translator.timeout_secs = 2;
    config.timeouts.request_secs = 10;
    config
}

/// Start a gateway on an ephemeral port. Dropping the returned `Shutdown`
/// without triggering it leaves the server running until the test ends.
pub async fn spawn_gateway(config: GatewayConfig, translator: Arc<dyn Translator>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, translator);
    let stop = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, stop).await;
    });

    (addr, shutdown)
}

/// Start a gateway backed by the real HTTP translator.
pub async fn spawn_gateway_from_config(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::from_config(config).unwrap();
    let stop = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, stop).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// What the stub does when called.
pub enum StubReply {
    /// Answer `"[{target_lang}] {text}"`.
    Echo,
    /// Fail with this upstream message.
    Fail(&'static str),
    /// Never answer.
    Hang,
}

/// In-process translator that records every call.
pub struct StubTranslator {
    reply: StubReply,
    calls: Mutex<Vec<TranslationRequest>>,
}

impl StubTranslator {
    pub fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<TranslationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for StubTranslator {
    fn model(&self) -> &str {
        "stub"
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslatorError> {
        self.calls.lock().unwrap().push(request.clone());
        match self.reply {
            StubReply::Echo => Ok(Translation {
                translated_text: format!("[{}] {}", request.target_lang, request.text),
            }),
            StubReply::Fail(message) => Err(TranslatorError::Upstream {
                status: 500,
                message: message.to_string(),
            }),
            StubReply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                unreachable!("stub translator hung for an hour")
            }
        }
    }
}

/// One request seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct UpstreamCall {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

/// Start a programmable mock of the hosted inference API. `f` receives the
/// decoded request body and returns `(status, json_body)`.
///
/// Returns the base URL to put in `translator.base_url` and the call log.
pub async fn start_mock_upstream<F, Fut>(f: F) -> (String, Arc<Mutex<Vec<UpstreamCall>>>)
where
    F: Fn(Value) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(Mutex::new(Vec::new()));

    let log = calls.clone();
    let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, body: Bytes| {
        let f = f.clone();
        let log = log.clone();
        async move {
            let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
            log.lock().unwrap().push(UpstreamCall {
                path: uri.path().to_string(),
                authorization: headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body: body.clone(),
            });

            let (status, reply) = f(body).await;
            (
                StatusCode::from_u16(status).unwrap(),
                [(header::CONTENT_TYPE, "application/json")],
                reply,
            )
        }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{}/client/v4", addr), calls)
}
