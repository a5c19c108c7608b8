pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::ocr::OcrService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ocr: Arc<OcrService>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let ocr = OcrService::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            ocr: Arc::new(ocr),
        })
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/api/parse", post(routes::parse::parse))
        .route("/api/validate", post(routes::parse::validate))
        .route("/api/export/tsv", post(routes::parse::export_tsv))
        .route("/api/layout", post(routes::layout::plan))
        .route("/api/layout/pdf", post(routes::layout::pdf))
        .route("/api/table", post(routes::table::import))
        .route("/api/ocr", post(routes::ocr::recognize))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    if config.ocr_api_key.is_none() {
        tracing::warn!("OCR_SPACE_API_KEY not set; OCR requests must supply a key");
    }

    let addr = config.addr();
    let state = AppState::new(config)?;
    let app = router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
