pub mod analyze_routes;
pub mod config;
pub mod error;
pub mod pdf;
pub mod request_id;
pub mod security_headers;


use std::sync::Arc;

use analysis_core::Vocabulary;
use analysis_orchestrator::{AnalysisSettings, DocumentAnalysisOrchestrator};
use anyhow::Context;
use axum::{extract::DefaultBodyLimit, http::HeaderValue, middleware, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::ServerConfig;
pub use error::ApiError;

/// Room for multipart boundaries and the `query` part on top of the file limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<DocumentAnalysisOrchestrator>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Builds the shared orchestrator, loading a custom vocabulary if configured.
    pub fn from_config(config: ServerConfig) -> anyhow::Result<Self> {
        let vocabulary = match &config.vocabulary_path {
            Some(path) => {
                let vocabulary = Vocabulary::load(path).with_context(|| {
                    format!("Failed to load vocabulary from {}", path.display())
                })?;
                tracing::info!(path = %path.display(), "Loaded custom keyword vocabulary");
                vocabulary
            }
            None => Vocabulary::default(),
        };

        let settings = AnalysisSettings {
            numeral_policy: config.numeral_policy,
            vocabulary,
        };

        Ok(Self {
            orchestrator: Arc::new(DocumentAnalysisOrchestrator::with_settings(&settings)),
            config: Arc::new(config),
        })
    }
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Skipping invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    // Last layer added runs first: request IDs exist before the trace span is made.
    Router::new()
        .merge(analyze_routes::analyze_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers::security_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http().make_span_with(request_id::make_request_span))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors_layer(&state.config))
        .with_state(state)
}

pub fn init_tracing() {
    // Structured JSON logging when RUST_LOG_FORMAT=json (for log aggregation)
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, draining connections");
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr()?;
    tracing::info!(
        numeral_policy = config.numeral_policy.as_str(),
        max_upload_bytes = config.max_upload_bytes,
        "Configuration loaded"
    );

    let app = build_router(AppState::from_config(config)?);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🚀 Financial Document Analyzer listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
