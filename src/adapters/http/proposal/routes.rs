//! Route configuration for proposal endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    download_proposal, health, plan_proposal, preview_proposal, ProposalAppState,
};

/// Creates the proposal router with all endpoints.
///
/// Routes:
/// - `GET /health` - Liveness check
/// - `POST /api/proposals/plan` - Enriched answers, schedule and estimate as JSON
/// - `POST /api/proposals/preview` - Rendered proposal as HTML
/// - `POST /api/proposals/document` - Rendered proposal as a PDF download
pub fn proposal_router() -> Router<ProposalAppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/proposals/plan", post(plan_proposal))
        .route("/api/proposals/preview", post(preview_proposal))
        .route("/api/proposals/document", post(download_proposal))
}
