//! Data transfer objects for proposal endpoints.

use serde::Serialize;

use crate::application::handlers::proposal::ProposalPlan;
use crate::domain::costing::CostEstimate;
use crate::domain::schedule::ProjectSchedule;
use crate::domain::wizard::EnrichedAnswers;

/// Response for `POST /api/proposals/plan`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalPlanResponse {
    pub proposal_id: String,
    pub answers: EnrichedAnswers,
    pub schedule: ProjectSchedule,
    pub estimate: CostEstimate,
    /// Schedule and estimate notes merged, as they appear in the document.
    pub notes: Vec<String>,
}

impl From<ProposalPlan> for ProposalPlanResponse {
    fn from(plan: ProposalPlan) -> Self {
        let notes = plan.notes();
        Self {
            proposal_id: plan.proposal_id.to_string(),
            answers: plan.answers,
            schedule: plan.schedule,
            estimate: plan.estimate,
            notes,
        }
    }
}

/// Response for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
