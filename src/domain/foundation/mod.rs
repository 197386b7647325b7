//! Foundation module - Shared domain primitives.
//!
//! Identifiers and error types used across the proposal domain.

mod errors;
mod ids;

pub use errors::ValidationError;
pub use ids::ProposalId;
