//! Proposal Renderer Port - Final document output.
//!
//! Takes the assembled [`ProposalDocument`] and produces a complete HTML page
//! or PDF bytes. Adapters decide how (an HTML builder plus an external
//! converter process in production).

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::costing::CostEstimate;
use crate::domain::foundation::ProposalId;
use crate::domain::schedule::ScheduledPhase;
use crate::domain::wizard::ResourcingPlan;

/// Port for rendering an assembled proposal.
///
/// # Usage
///
/// ```rust,ignore
/// let renderer: &dyn ProposalRenderer = get_renderer();
/// let html = renderer.to_html(&document).await?;
/// let pdf_bytes = renderer.to_pdf(&document).await?;
/// ```
#[async_trait]
pub trait ProposalRenderer: Send + Sync {
    /// Complete HTML document (`<html>`, `<head>`, `<body>`).
    async fn to_html(&self, document: &ProposalDocument) -> Result<String, ExportError>;

    /// PDF bytes ready to be written to a file or sent as a response.
    async fn to_pdf(&self, document: &ProposalDocument) -> Result<Vec<u8>, ExportError>;

    /// Whether external tooling needed for PDF output is present.
    async fn is_available(&self) -> bool;
}

/// Everything the renderer needs, already computed.
///
/// Narrative sections are markdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDocument {
    pub proposal_id: ProposalId,
    pub title: String,
    pub executive_summary: String,
    pub introduction: String,
    pub technical_solution: String,
    pub phases: Vec<ScheduledPhase>,
    pub estimate: CostEstimate,
    pub resourcing: Option<ResourcingPlan>,
    /// Schedule and estimate notes, deduplicated, in order of appearance.
    pub notes: Vec<String>,
}

impl ProposalDocument {
    /// Title used on every generated proposal.
    pub const DEFAULT_TITLE: &'static str = "Software Development Proposal";

    /// File name offered for PDF downloads.
    pub const PDF_FILENAME: &'static str = "software_proposal.pdf";
}

/// Why a proposal could not be turned into its final format.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// The PDF converter is not installed or does not respond.
    #[error("PDF converter unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("PDF conversion failed: {0}")]
    PdfConversionFailed(String),

    #[error("PDF conversion timed out after {0} seconds")]
    Timeout(u64),
}

impl ExportError {
    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }

    pub fn pdf_failed(reason: impl Into<String>) -> Self {
        Self::PdfConversionFailed(reason.into())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
