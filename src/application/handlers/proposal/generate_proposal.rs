//! GenerateProposalHandler - Assembles and renders a full proposal.
//!
//! Runs planning, renders the narrative sections with the plan as context,
//! then hands the assembled [`ProposalDocument`] to the renderer. Narrative
//! and rendering failures abort the request.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use super::plan_proposal::{
    PlanProposalCommand, PlanProposalError, PlanProposalHandler, ProposalPlan,
};
use crate::domain::catalog::ProposalCatalog;
use crate::domain::costing::CostEstimate;
use crate::domain::foundation::{ProposalId, ValidationError};
use crate::domain::schedule::ProjectSchedule;
use crate::domain::wizard::{EnrichedAnswers, WizardAnswers};
use crate::ports::{
    ExportError, NarrativeError, NarrativeRenderer, NarrativeSection, ProposalDocument,
    ProposalRenderer, TechnicalVariant,
};

/// Requested output of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Pdf,
}

/// Command to generate a proposal document.
#[derive(Debug, Clone)]
pub struct GenerateProposalCommand {
    pub answers: WizardAnswers,
    pub format: OutputFormat,
}

/// Rendered proposal content.
#[derive(Debug, Clone, PartialEq)]
pub enum ProposalOutput {
    Html(String),
    Pdf(Vec<u8>),
}

/// Result of successful proposal generation.
#[derive(Debug, Clone)]
pub struct GenerateProposalResult {
    pub proposal_id: ProposalId,
    pub output: ProposalOutput,
    /// Degradations met while planning, as shown in the document.
    pub notes: Vec<String>,
}

/// Error type for proposal generation.
#[derive(Debug, Clone)]
pub enum GenerateProposalError {
    InvalidAnswers(ValidationError),
    Narrative(NarrativeError),
    Render(ExportError),
}

impl std::fmt::Display for GenerateProposalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateProposalError::InvalidAnswers(err) => write!(f, "Invalid answers: {}", err),
            GenerateProposalError::Narrative(err) => write!(f, "{}", err),
            GenerateProposalError::Render(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GenerateProposalError {}

impl From<PlanProposalError> for GenerateProposalError {
    fn from(err: PlanProposalError) -> Self {
        match err {
            PlanProposalError::InvalidAnswers(e) => GenerateProposalError::InvalidAnswers(e),
        }
    }
}

impl From<NarrativeError> for GenerateProposalError {
    fn from(err: NarrativeError) -> Self {
        GenerateProposalError::Narrative(err)
    }
}

impl From<ExportError> for GenerateProposalError {
    fn from(err: ExportError) -> Self {
        GenerateProposalError::Render(err)
    }
}

/// Figures templates commonly need, precomputed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Highlights {
    project_start: Option<NaiveDate>,
    project_end: Option<NaiveDate>,
    phase_count: usize,
    unresolved_phase_count: usize,
    total_business_days: u32,
    total_effort_hours: f64,
}

/// Data handed to every narrative template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct NarrativeContext<'a> {
    proposal_id: ProposalId,
    answers: &'a EnrichedAnswers,
    schedule: &'a ProjectSchedule,
    estimate: &'a CostEstimate,
    highlights: Highlights,
}

impl<'a> NarrativeContext<'a> {
    fn from_plan(plan: &'a ProposalPlan) -> Self {
        let schedule = &plan.schedule;
        Self {
            proposal_id: plan.proposal_id,
            answers: &plan.answers,
            schedule,
            estimate: &plan.estimate,
            highlights: Highlights {
                project_start: schedule.project_start(),
                project_end: schedule.project_end(),
                phase_count: schedule.phases.len(),
                unresolved_phase_count: schedule.unresolved().count(),
                total_business_days: schedule.phases.iter().map(|p| p.business_days).sum(),
                total_effort_hours: plan.estimate.total_effort_hours(),
            },
        }
    }
}

/// Handler for generating complete proposals.
pub struct GenerateProposalHandler {
    planner: PlanProposalHandler,
    narrative: Arc<dyn NarrativeRenderer>,
    renderer: Arc<dyn ProposalRenderer>,
}

impl GenerateProposalHandler {
    pub fn new(
        catalog: Arc<ProposalCatalog>,
        narrative: Arc<dyn NarrativeRenderer>,
        renderer: Arc<dyn ProposalRenderer>,
    ) -> Self {
        Self {
            planner: PlanProposalHandler::new(catalog),
            narrative,
            renderer,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateProposalCommand,
    ) -> Result<GenerateProposalResult, GenerateProposalError> {
        let document = self.assemble(cmd.answers).await?;

        let output = match cmd.format {
            OutputFormat::Html => ProposalOutput::Html(self.renderer.to_html(&document).await?),
            OutputFormat::Pdf => ProposalOutput::Pdf(self.renderer.to_pdf(&document).await?),
        };

        tracing::info!(
            proposal_id = %document.proposal_id,
            format = ?cmd.format,
            notes = document.notes.len(),
            "proposal generated"
        );

        Ok(GenerateProposalResult {
            proposal_id: document.proposal_id,
            output,
            notes: document.notes,
        })
    }

    /// Plans the proposal and renders its narrative sections.
    pub async fn assemble(
        &self,
        answers: WizardAnswers,
    ) -> Result<ProposalDocument, GenerateProposalError> {
        // 1. Enrich, schedule and cost
        let plan = self.planner.handle(PlanProposalCommand { answers })?;

        // 2. Narrative sections, one after another
        let context = narrative_context(&plan)?;
        let variant = TechnicalVariant::for_application(plan.answers.application_type());
        let executive_summary = self
            .render_section(NarrativeSection::ExecutiveSummary, &context)
            .await?;
        let introduction = self
            .render_section(NarrativeSection::Introduction, &context)
            .await?;
        let technical_solution = self
            .render_section(NarrativeSection::TechnicalSolution(variant), &context)
            .await?;

        // 3. Shape the document
        let notes = plan.notes();
        let ProposalPlan {
            proposal_id,
            answers,
            schedule,
            estimate,
        } = plan;

        Ok(ProposalDocument {
            proposal_id,
            title: ProposalDocument::DEFAULT_TITLE.to_string(),
            executive_summary,
            introduction,
            technical_solution,
            phases: schedule.phases,
            estimate,
            resourcing: answers.resourcing,
            notes,
        })
    }

    async fn render_section(
        &self,
        section: NarrativeSection,
        context: &Value,
    ) -> Result<String, GenerateProposalError> {
        self.narrative.render(section, context).await.map_err(|e| {
            tracing::error!(section = %section, error = %e, "narrative rendering failed");
            GenerateProposalError::Narrative(e)
        })
    }
}

fn narrative_context(plan: &ProposalPlan) -> Result<Value, GenerateProposalError> {
    serde_json::to_value(NarrativeContext::from_plan(plan)).map_err(|e| {
        GenerateProposalError::Narrative(NarrativeError::render_failed(
            "context",
            e.to_string(),
        ))
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
