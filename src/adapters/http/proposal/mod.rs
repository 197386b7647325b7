//! HTTP adapter for proposal generation.
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness check
//! - `POST /api/proposals/plan` - Schedule and estimate as JSON
//! - `POST /api/proposals/preview` - Proposal as HTML
//! - `POST /api/proposals/document` - Proposal as PDF

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::{ProposalApiError, ProposalAppState, PROPOSAL_ID_HEADER};
pub use routes::proposal_router;
