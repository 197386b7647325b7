//! Document adapters - HTML assembly and PDF conversion.

mod pandoc_renderer;
mod proposal_html;

pub use pandoc_renderer::{PandocProposalRenderer, DEFAULT_PANDOC, DEFAULT_PDF_ENGINE};
pub use proposal_html::{html_escape, markdown_to_html, ProposalHtmlBuilder};
