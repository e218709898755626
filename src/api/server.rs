//! HTTP server implementation for the API

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{error, info};

use super::{handlers, models::SummarizeQuery};
use crate::captions::{CaptionRetriever, YtDlpExtractor};
use crate::config::Config;
use crate::summarizer::{create_summarizer, Summarizer, SummarizerError};

/// Shared application state, read-only across requests
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub retriever: Arc<CaptionRetriever>,
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    /// Build the shared state once at startup: extractor, retriever and model client
    pub fn from_config(config: Config) -> Result<Self> {
        let extractor = YtDlpExtractor::new(&config.extractor, config.subtitles.format.clone());
        let retriever = CaptionRetriever::new(Arc::new(extractor), &config.subtitles)?;
        let summarizer = create_summarizer(&config.summarizer)?;

        Ok(Self {
            config: Arc::new(config),
            retriever: Arc::new(retriever),
            summarizer,
        })
    }
}

/// Summarization failures surface as an unstructured server error
pub struct ApiError(SummarizerError);

impl From<SummarizerError> for ApiError {
    fn from(err: SummarizerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Summarization failed: {}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let index_file = static_dir.join(&state.config.server.index_file);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/summarize", get(summarize_handler))
        .route("/health", get(health_handler))
        .route_service("/", ServeFile::new(index_file))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Configure and start the HTTP server
pub async fn start_http_server(state: AppState, addr: SocketAddr) -> Result<()> {
    info!("🚀 Starting HTTP server on {}", addr);

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 API server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Summarize handler
async fn summarize_handler(
    State(state): State<AppState>,
    Query(query): Query<SummarizeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let response = handlers::summarize_video(&state, &query.url).await?;
    Ok(Json(response))
}

/// Health check handler
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match handlers::health_check(&state).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => {
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            (status, Json(serde_json::json!({"error": e.to_string()}))).into_response()
        }
    }
}
