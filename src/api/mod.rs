//! API module for the YouTube summarizer
//!
//! Serves the summarize endpoint, a health check, and the static web UI.

use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;

pub mod handlers;
pub mod models;
pub mod server;

pub use server::{build_router, AppState};

/// API server bound to a single address
pub struct ApiServer {
    state: AppState,
    addr: SocketAddr,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(state: AppState, addr: SocketAddr) -> Self {
        Self { state, addr }
    }

    /// Start the API server
    pub async fn start(self) -> Result<()> {
        info!(
            "🧠 Summarizer model: {} ({:?})",
            self.state.summarizer.model_name(),
            self.state.summarizer.provider_type()
        );
        server::start_http_server(self.state, self.addr).await
    }
}
