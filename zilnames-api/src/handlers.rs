//! API route handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use zilnames_core::types::Resolution;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// Chain for a name: explicit, else suffix-inferred, else the default.
fn chain_for_name(state: &AppState, name: &str, query: &LookupQuery) -> u64 {
    query.chain_id.unwrap_or_else(|| {
        state
            .resolver
            .network_for_name(name)
            .map(|network| network.chain_id())
            .unwrap_or_else(|_| state.default_chain_id())
    })
}

/// Validation failures become 422s; every other outcome is a 200 body.
fn reject_invalid<T>(resolution: &Resolution<T>) -> Result<()> {
    match resolution.error() {
        Some(err) if err.is_validation_error() => Err(ApiError::from(err.clone())),
        _ => Ok(()),
    }
}

/// GET /api/v1/address/:name
pub async fn resolve_address(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<AddressResponse>> {
    let chain_id = chain_for_name(&state, &name, &query);
    let resolution = if query.refresh {
        state.resolver.refetch_address(&name, chain_id).await
    } else {
        state.resolver.resolve_address(&name, chain_id).await
    };

    reject_invalid(&resolution)?;
    debug!(%name, chain_id, status = ?resolution.status(), "Address lookup");
    Ok(Json(ResolutionResponse::new(resolution, chain_id)))
}

/// GET /api/v1/name/:address
pub async fn resolve_name(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<NameResponse>> {
    let chain_id = query.chain_id.unwrap_or_else(|| state.default_chain_id());
    let resolution = if query.refresh {
        state.resolver.refetch_name(&address, chain_id).await
    } else {
        state.resolver.resolve_name(&address, chain_id).await
    };

    reject_invalid(&resolution)?;
    debug!(%address, chain_id, status = ?resolution.status(), "Name lookup");
    Ok(Json(ResolutionResponse::new(resolution, chain_id)))
}

/// GET /api/v1/avatar/:name
pub async fn resolve_avatar(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<AvatarResponse>> {
    let chain_id = chain_for_name(&state, &name, &query);
    let resolution = if query.refresh {
        state.resolver.refetch_avatar(&name, chain_id).await
    } else {
        state.resolver.resolve_avatar(&name, chain_id).await
    };

    reject_invalid(&resolution)?;
    Ok(Json(ResolutionResponse::new(resolution, chain_id)))
}

/// GET /api/v1/profile/:address
pub async fn resolve_profile(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<ProfileResponse>> {
    let chain_id = query.chain_id.unwrap_or_else(|| state.default_chain_id());
    let profile = if query.refresh {
        state.resolver.refetch_profile(&address, chain_id).await
    } else {
        state.resolver.resolve_profile(&address, chain_id).await
    };

    reject_invalid(&profile.name)?;
    let canonical = address.trim().to_lowercase();
    Ok(Json(ProfileResponse::new(canonical, profile, chain_id)))
}

/// GET /api/v1/networks
pub async fn list_networks(State(state): State<Arc<AppState>>) -> Json<NetworksResponse> {
    Json(NetworksResponse {
        default_chain_id: state.default_chain_id(),
        networks: state.resolver.networks().iter().map(NetworkDto::from).collect(),
    })
}

static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let start = START_TIME.get_or_init(Instant::now);

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: start.elapsed().as_secs(),
        default_chain_id: state.default_chain_id(),
        cache: state.resolver.cache_stats(),
    })
}
