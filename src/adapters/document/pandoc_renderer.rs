//! Proposal renderer producing HTML in-process and PDF through Pandoc.
//!
//! # Architecture
//!
//! This adapter implements the `ProposalRenderer` port. HTML comes from
//! [`ProposalHtmlBuilder`]; PDF conversion pipes that HTML into an external
//! `pandoc` process, which delegates to a PDF engine (wkhtmltopdf by
//! default).

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::proposal_html::ProposalHtmlBuilder;
use crate::ports::{ExportError, ProposalDocument, ProposalRenderer};

/// Default PDF engine handed to Pandoc.
pub const DEFAULT_PDF_ENGINE: &str = "wkhtmltopdf";

/// Program looked up on `PATH` when no explicit path is configured.
pub const DEFAULT_PANDOC: &str = "pandoc";

/// Renderer using the HTML builder plus Pandoc for PDF.
///
/// # Example
///
/// ```rust,ignore
/// let renderer = PandocProposalRenderer::new()
///     .with_pdf_engine("weasyprint")
///     .with_pdf_timeout(60);
///
/// let html = renderer.to_html(&document).await?;
/// let pdf = renderer.to_pdf(&document).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PandocProposalRenderer {
    html: ProposalHtmlBuilder,
    program: String,
    pdf_engine: String,
    timeout: Duration,
}

impl PandocProposalRenderer {
    pub fn new() -> Self {
        Self {
            html: ProposalHtmlBuilder::new(),
            program: DEFAULT_PANDOC.to_string(),
            pdf_engine: DEFAULT_PDF_ENGINE.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Runs this executable instead of `pandoc` from `PATH`.
    pub fn with_pandoc_path(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_pdf_engine(mut self, engine: impl Into<String>) -> Self {
        self.pdf_engine = engine.into();
        self
    }

    /// Upper bound on one conversion; the process is killed when it expires.
    pub fn with_pdf_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout = Duration::from_secs(timeout_secs);
        self
    }

    /// Arguments converting HTML on stdin to PDF on stdout.
    fn pdf_args(&self) -> [String; 7] {
        [
            "-f".to_string(),
            "html".to_string(),
            "-t".to_string(),
            "pdf".to_string(),
            format!("--pdf-engine={}", self.pdf_engine),
            "-o".to_string(),
            "-".to_string(),
        ]
    }

    async fn pandoc_responds(&self) -> bool {
        match Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
        {
            Ok(status) => status.success(),
            Err(err) => {
                tracing::debug!(program = %self.program, error = %err, "pandoc probe failed");
                false
            }
        }
    }

    async fn html_to_pdf(&self, html: String) -> Result<Vec<u8>, ExportError> {
        let mut child = Command::new(&self.program)
            .args(self.pdf_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ExportError::pdf_failed(format!("could not start {}: {}", self.program, e))
            })?;

        let stdin = child.stdin.take();
        let run = async move {
            // Closing stdin signals end of input.
            if let Some(mut stdin) = stdin {
                stdin.write_all(html.as_bytes()).await?;
            }
            child.wait_with_output().await
        };

        let output = match tokio::time::timeout(self.timeout, run).await {
            Err(_) => return Err(ExportError::Timeout(self.timeout.as_secs())),
            Ok(result) => result.map_err(|e| ExportError::pdf_failed(e.to_string()))?,
        };

        if !output.status.success() {
            return Err(ExportError::pdf_failed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        if output.stdout.is_empty() {
            return Err(ExportError::pdf_failed("converter wrote an empty document"));
        }

        Ok(output.stdout)
    }
}

impl Default for PandocProposalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProposalRenderer for PandocProposalRenderer {
    async fn to_html(&self, document: &ProposalDocument) -> Result<String, ExportError> {
        Ok(self.html.build(document))
    }

    async fn to_pdf(&self, document: &ProposalDocument) -> Result<Vec<u8>, ExportError> {
        if !self.pandoc_responds().await {
            return Err(ExportError::service_unavailable(format!(
                "'{}' is not installed. PDF export requires Pandoc and the {} engine.",
                self.program, self.pdf_engine
            )));
        }

        let html = self.html.build(document);
        tracing::debug!(
            proposal_id = %document.proposal_id,
            engine = %self.pdf_engine,
            html_bytes = html.len(),
            "converting proposal to PDF"
        );
        let pdf = self.html_to_pdf(html).await?;
        tracing::info!(
            proposal_id = %document.proposal_id,
            pdf_bytes = pdf.len(),
            "proposal PDF generated"
        );
        Ok(pdf)
    }

    async fn is_available(&self) -> bool {
        self.pandoc_responds().await
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::costing::CostEstimate;
    use crate::domain::foundation::ProposalId;

    fn document() -> ProposalDocument {
        ProposalDocument {
            proposal_id: ProposalId::new(),
            title: ProposalDocument::DEFAULT_TITLE.to_string(),
            executive_summary: "# Summary".to_string(),
            introduction: String::new(),
            technical_solution: String::new(),
            phases: vec![],
            estimate: CostEstimate {
                cost_by_phase: vec![],
                sub_total: 0.0,
                complexity_adjustment_factor: 1.0,
                complexity_adjustment_name: None,
                total: 0.0,
                currency: "USD".to_string(),
                notes: vec![],
            },
            resourcing: None,
            notes: vec![],
        }
    }

    #[test]
    fn builder_methods_override_defaults() {
        let renderer = PandocProposalRenderer::new()
            .with_pandoc_path("/opt/pandoc/bin/pandoc")
            .with_pdf_engine("weasyprint")
            .with_pdf_timeout(5);
        assert_eq!(renderer.program, "/opt/pandoc/bin/pandoc");
        assert_eq!(renderer.timeout, Duration::from_secs(5));
        assert_eq!(renderer.pdf_args()[4], "--pdf-engine=weasyprint");
        assert_eq!(PandocProposalRenderer::default().program, DEFAULT_PANDOC);
    }

    #[tokio::test]
    async fn to_html_needs_no_external_tools() {
        let renderer = PandocProposalRenderer::new().with_pandoc_path("/nonexistent/pandoc");
        let html = renderer.to_html(&document()).await.unwrap();
        assert!(html.contains("<h2>Executive Summary</h2>"));
    }

    #[tokio::test]
    async fn to_pdf_reports_missing_pandoc() {
        let renderer = PandocProposalRenderer::new().with_pandoc_path("/nonexistent/pandoc");
        let err = renderer.to_pdf(&document()).await.unwrap_err();
        assert!(matches!(err, ExportError::ServiceUnavailable(_)));
        assert!(!renderer.is_available().await);
    }
}
