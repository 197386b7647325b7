//! HTTP adapters - REST API implementations.
//!
//! [`app_router`] wires the proposal routes with the middleware stack used
//! by the binary: request tracing, a request timeout and CORS.

pub mod proposal;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{CorsPolicy, ServerConfig};

// Re-export key types for convenience
pub use proposal::proposal_router;
pub use proposal::ProposalAppState;

/// Full application router with middleware applied.
pub fn app_router(state: ProposalAppState, server: &ServerConfig) -> Router {
    proposal_router()
        .with_state(state)
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

/// CORS layer for the configured policy.
pub fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = match server.cors_policy() {
        CorsPolicy::Any => return CorsLayer::permissive(),
        CorsPolicy::Origins(origins) => origins,
    };

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([
            header::CONTENT_DISPOSITION,
            header::HeaderName::from_static(proposal::PROPOSAL_ID_HEADER),
        ])
}
