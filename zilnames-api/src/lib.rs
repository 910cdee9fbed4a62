//! # Zilnames API Server
//!
//! REST API over the Zilnames resolver.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness and cache statistics
//! - `GET /api/v1/networks` - Supported networks
//! - `GET /api/v1/address/:name` - Name → address
//! - `GET /api/v1/name/:address` - Address → primary name
//! - `GET /api/v1/avatar/:name` - Name → avatar URL
//! - `GET /api/v1/profile/:address` - Address → name and avatar
//!
//! Every lookup accepts `?chain_id=` and `?refresh=true`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use zilnames_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::new(ApiConfig::from_env())?;
//! server.run(([0, 0, 0, 0], 3001)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use zilnames_core::error::Result;

/// API server for Zilnames.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self::from_state(Arc::new(AppState::new(config)?)))
    }

    /// Creates a server around existing state.
    pub fn from_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!(
            default_chain_id = self.state.default_chain_id(),
            "Zilnames API server listening on {}", addr
        );

        axum::serve(listener, self.router()).await
    }
}

/// Starts the API server with configuration from the environment.
pub async fn start_server(port: u16) -> std::io::Result<()> {
    let server = ApiServer::new(ApiConfig::from_env()).map_err(std::io::Error::other)?;
    server.run(([0, 0, 0, 0], port)).await
}
