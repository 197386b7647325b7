//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `document` - HTML assembly and pandoc PDF conversion
//! - `http` - REST API (axum)
//! - `narrative` - Handlebars section templates on disk

pub mod document;
pub mod http;
pub mod narrative;

pub use document::{PandocProposalRenderer, ProposalHtmlBuilder};
pub use http::{app_router, ProposalAppState};
pub use narrative::HandlebarsNarrativeRenderer;
