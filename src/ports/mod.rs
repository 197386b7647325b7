//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the proposal pipeline and the outside world. Adapters implement these
//! ports.
//!
//! ## Rendering Ports
//!
//! - `NarrativeRenderer` - Template-driven prose sections
//! - `ProposalRenderer` - Final HTML and PDF output

mod narrative_renderer;
mod proposal_renderer;

pub use narrative_renderer::{
    NarrativeError, NarrativeRenderer, NarrativeSection, TechnicalVariant,
};
pub use proposal_renderer::{ExportError, ProposalDocument, ProposalRenderer};
