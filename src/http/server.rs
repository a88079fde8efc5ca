//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the translation handler on every path
//! - Wire up middleware (request ID, tracing, timeout, CORS origin)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Request, StatusCode},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::handler::translate_handler;
use crate::http::request::{RequestIdExt, UuidRequestId};
use crate::security::ApiKey;
use crate::translate::{Translator, TranslatorError, WorkersAiTranslator};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub api_key: ApiKey,
    pub translator: Arc<dyn Translator>,
    pub upstream_timeout: Duration,
    /// Request bodies are read up to this many bytes, after authentication.
    pub max_body_size: usize,
}

/// HTTP server for the translation gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server that forwards to the given translator.
    pub fn new(config: GatewayConfig, translator: Arc<dyn Translator>) -> Self {
        let state = AppState {
            api_key: ApiKey::new(config.auth.api_key.clone()),
            translator,
            upstream_timeout: Duration::from_secs(config.translator.timeout_secs),
            max_body_size: config.security.max_body_size,
        };

        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Create a server backed by the hosted model named in the config.
    pub fn from_config(config: GatewayConfig) -> Result<Self, TranslatorError> {
        let translator = Arc::new(WorkersAiTranslator::new(&config.translator)?);
        Ok(Self::new(config, translator))
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires or its sender is dropped.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            model = %self.config.translator.model,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
///
/// The body size limit is enforced in the handler so that unauthenticated
/// callers always get 401, whatever they send.
pub fn build_router(config: &GatewayConfig, state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                request_id = %request.headers().request_id(),
                method = %request.method(),
                path = %request.uri().path(),
            )
        }))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.timeouts.request_secs),
        ))
        .layer(DefaultBodyLimit::disable());

    Router::new()
        .route("/", any(translate_handler))
        .route("/{*path}", any(translate_handler))
        .with_state(state)
        .layer(middleware)
}
