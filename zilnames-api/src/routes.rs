//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .route("/api/v1/networks", get(handlers::list_networks))

        // Lookups
        .route("/api/v1/address/:name", get(handlers::resolve_address))
        .route("/api/v1/name/:address", get(handlers::resolve_name))
        .route("/api/v1/avatar/:name", get(handlers::resolve_avatar))
        .route("/api/v1/profile/:address", get(handlers::resolve_profile))

        .with_state(state)
}
