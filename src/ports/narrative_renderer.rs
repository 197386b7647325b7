//! Narrative Renderer Port - Prose sections of a proposal.
//!
//! Narrative sections are produced from templates that receive the enriched
//! answers together with the computed schedule and estimate. The output is
//! markdown; turning it into the final document is the job of
//! [`ProposalRenderer`](super::ProposalRenderer).

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::wizard::ApplicationType;

/// Port for rendering one narrative section.
///
/// # Contract
///
/// Implementations must:
/// - Render the template registered for `section` against `context`
/// - Fail with [`NarrativeError::TemplateNotFound`] when the template is missing
/// - Never return partial output on failure
#[async_trait]
pub trait NarrativeRenderer: Send + Sync {
    async fn render(
        &self,
        section: NarrativeSection,
        context: &Value,
    ) -> Result<String, NarrativeError>;
}

/// Variant of the technical solution section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechnicalVariant {
    Web,
    Mobile,
    Both,
    Generic,
}

impl TechnicalVariant {
    /// Variant for the project's application type.
    pub fn for_application(application_type: Option<ApplicationType>) -> Self {
        match application_type {
            Some(ApplicationType::Web) => TechnicalVariant::Web,
            Some(ApplicationType::Mobile) => TechnicalVariant::Mobile,
            Some(ApplicationType::Both) => TechnicalVariant::Both,
            None => TechnicalVariant::Generic,
        }
    }
}

/// Fixed narrative sections of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NarrativeSection {
    ExecutiveSummary,
    Introduction,
    TechnicalSolution(TechnicalVariant),
}

impl NarrativeSection {
    /// Key of the template backing this section.
    pub fn template_name(&self) -> &'static str {
        match self {
            NarrativeSection::ExecutiveSummary => "executive_summary",
            NarrativeSection::Introduction => "introduction",
            NarrativeSection::TechnicalSolution(TechnicalVariant::Web) => "technical_solution_web",
            NarrativeSection::TechnicalSolution(TechnicalVariant::Mobile) => {
                "technical_solution_mobile"
            }
            NarrativeSection::TechnicalSolution(TechnicalVariant::Both) => {
                "technical_solution_both"
            }
            NarrativeSection::TechnicalSolution(TechnicalVariant::Generic) => {
                "technical_solution_generic"
            }
        }
    }
}

impl std::fmt::Display for NarrativeSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.template_name())
    }
}

/// Errors that can occur while rendering narrative text.
#[derive(Debug, Clone, Error)]
pub enum NarrativeError {
    #[error("Narrative template not found: {0}")]
    TemplateNotFound(String),

    #[error("Invalid narrative template name: {0}")]
    InvalidTemplateName(String),

    #[error("Failed to render narrative section {section}: {reason}")]
    RenderFailed { section: String, reason: String },
}

impl NarrativeError {
    pub fn render_failed(section: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RenderFailed {
            section: section.into(),
            reason: reason.into(),
        }
    }
}
