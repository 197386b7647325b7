//! PlanProposalHandler - Enrichment, scheduling and costing.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::catalog::ProposalCatalog;
use crate::domain::costing::{CostEstimate, CostEstimator};
use crate::domain::foundation::{ProposalId, ValidationError};
use crate::domain::schedule::{PhaseScheduler, ProjectSchedule};
use crate::domain::wizard::{EnrichedAnswers, WizardAnswers};

/// Note recorded when the questionnaire has no start date.
pub const NO_START_DATE_NOTE: &str =
    "No project start date was provided; the timeline and phase costs could not be computed.";

/// Command to compute the schedule and estimate for a questionnaire.
#[derive(Debug, Clone)]
pub struct PlanProposalCommand {
    pub answers: WizardAnswers,
}

/// Everything computed for one proposal before any rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalPlan {
    pub proposal_id: ProposalId,
    pub answers: EnrichedAnswers,
    pub schedule: ProjectSchedule,
    pub estimate: CostEstimate,
}

impl ProposalPlan {
    /// Schedule notes followed by estimate notes, without repeats.
    pub fn notes(&self) -> Vec<String> {
        let mut notes: Vec<String> = Vec::new();
        for note in self.schedule.notes.iter().chain(self.estimate.notes.iter()) {
            if !notes.contains(note) {
                notes.push(note.clone());
            }
        }
        notes
    }
}

/// Error type for proposal planning.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanProposalError {
    /// The answers cannot produce a timeline (e.g. an unreadable start date).
    InvalidAnswers(ValidationError),
}

impl std::fmt::Display for PlanProposalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanProposalError::InvalidAnswers(err) => write!(f, "Invalid answers: {}", err),
        }
    }
}

impl std::error::Error for PlanProposalError {}

impl From<ValidationError> for PlanProposalError {
    fn from(err: ValidationError) -> Self {
        PlanProposalError::InvalidAnswers(err)
    }
}

/// Handler running the pure part of the pipeline.
#[derive(Clone)]
pub struct PlanProposalHandler {
    catalog: Arc<ProposalCatalog>,
}

impl PlanProposalHandler {
    pub fn new(catalog: Arc<ProposalCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ProposalCatalog {
        &self.catalog
    }

    pub fn handle(&self, cmd: PlanProposalCommand) -> Result<ProposalPlan, PlanProposalError> {
        let proposal_id = ProposalId::new();

        // 1. Resolve names, start date and requested phases
        let answers = EnrichedAnswers::from_answers(&cmd.answers, &self.catalog)?;
        let include_mobile = answers.includes_mobile();
        tracing::debug!(
            %proposal_id,
            include_mobile,
            phases = answers.phases().len(),
            "answers enriched"
        );

        // 2. Place phases on the calendar
        let schedule = match answers.project_start_date() {
            Some(start) => PhaseScheduler::new(&self.catalog.dependencies).schedule(
                start,
                answers.phases(),
                include_mobile,
            ),
            None => {
                tracing::warn!(%proposal_id, "no project start date, skipping scheduling");
                ProjectSchedule::unscheduled(NO_START_DATE_NOTE)
            }
        };

        // 3. Cost the scheduled phases
        let estimate = CostEstimator::new(&self.catalog.rates, &self.catalog.complexity)
            .estimate(&answers, &schedule.phases);

        tracing::info!(
            %proposal_id,
            phases = schedule.phases.len(),
            total = estimate.total,
            currency = %estimate.currency,
            notes = schedule.notes.len() + estimate.notes.len(),
            "proposal planned"
        );

        Ok(ProposalPlan {
            proposal_id,
            answers,
            schedule,
            estimate,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
