//! HTTP handlers for proposal endpoints.
//!
//! These handlers connect Axum routes to the proposal command handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde_json::json;

use crate::application::handlers::proposal::{
    GenerateProposalCommand, GenerateProposalError, GenerateProposalHandler, OutputFormat,
    PlanProposalCommand, PlanProposalError, PlanProposalHandler, ProposalOutput,
};
use crate::domain::catalog::ProposalCatalog;
use crate::domain::foundation::ProposalId;
use crate::domain::wizard::WizardAnswers;
use crate::ports::{NarrativeRenderer, ProposalDocument, ProposalRenderer};

use super::dto::{ErrorResponse, HealthResponse, ProposalPlanResponse};

/// Header carrying the id of the generated proposal.
pub const PROPOSAL_ID_HEADER: &str = "x-proposal-id";

const GENERATION_FAILED: &str = "Failed to generate proposal document";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct ProposalAppState {
    pub catalog: Arc<ProposalCatalog>,
    pub narrative: Arc<dyn NarrativeRenderer>,
    pub renderer: Arc<dyn ProposalRenderer>,
}

impl ProposalAppState {
    pub fn new(
        catalog: Arc<ProposalCatalog>,
        narrative: Arc<dyn NarrativeRenderer>,
        renderer: Arc<dyn ProposalRenderer>,
    ) -> Self {
        Self {
            catalog,
            narrative,
            renderer,
        }
    }

    pub fn plan_handler(&self) -> PlanProposalHandler {
        PlanProposalHandler::new(self.catalog.clone())
    }

    pub fn generate_handler(&self) -> GenerateProposalHandler {
        GenerateProposalHandler::new(
            self.catalog.clone(),
            self.narrative.clone(),
            self.renderer.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

/// POST /api/proposals/plan - Schedule and estimate without rendering
pub async fn plan_proposal(
    State(state): State<ProposalAppState>,
    payload: Result<Json<WizardAnswers>, JsonRejection>,
) -> Result<impl IntoResponse, ProposalApiError> {
    let Json(answers) = payload?;
    let plan = state.plan_handler().handle(PlanProposalCommand { answers })?;
    Ok(Json(ProposalPlanResponse::from(plan)))
}

/// POST /api/proposals/preview - Full proposal as HTML
pub async fn preview_proposal(
    State(state): State<ProposalAppState>,
    payload: Result<Json<WizardAnswers>, JsonRejection>,
) -> Result<Response, ProposalApiError> {
    let Json(answers) = payload?;
    let result = state
        .generate_handler()
        .handle(GenerateProposalCommand {
            answers,
            format: OutputFormat::Html,
        })
        .await?;

    match result.output {
        ProposalOutput::Html(html) => {
            Ok(([proposal_id_header(result.proposal_id)?], Html(html)).into_response())
        }
        ProposalOutput::Pdf(_) => Err(ProposalApiError::Internal(
            "renderer returned PDF for an HTML request".to_string(),
        )),
    }
}

/// POST /api/proposals/document - Full proposal as a PDF download
pub async fn download_proposal(
    State(state): State<ProposalAppState>,
    payload: Result<Json<WizardAnswers>, JsonRejection>,
) -> Result<Response, ProposalApiError> {
    let Json(answers) = payload?;
    let result = state
        .generate_handler()
        .handle(GenerateProposalCommand {
            answers,
            format: OutputFormat::Pdf,
        })
        .await?;

    let ProposalOutput::Pdf(bytes) = result.output else {
        return Err(ProposalApiError::Internal(
            "renderer returned HTML for a PDF request".to_string(),
        ));
    };

    let disposition = format!("attachment; filename=\"{}\"", ProposalDocument::PDF_FILENAME);
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
        (header::CONTENT_DISPOSITION, header_value(&disposition)?),
        proposal_id_header(result.proposal_id)?,
    ];
    Ok((StatusCode::OK, headers, bytes).into_response())
}

fn proposal_id_header(
    proposal_id: ProposalId,
) -> Result<(HeaderName, HeaderValue), ProposalApiError> {
    Ok((
        HeaderName::from_static(PROPOSAL_ID_HEADER),
        header_value(&proposal_id.to_string())?,
    ))
}

fn header_value(value: &str) -> Result<HeaderValue, ProposalApiError> {
    HeaderValue::from_str(value).map_err(|e| ProposalApiError::Internal(e.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ProposalApiError {
    BadRequest(String),
    InvalidAnswers { field: String, message: String },
    Internal(String),
}

impl From<JsonRejection> for ProposalApiError {
    fn from(rejection: JsonRejection) -> Self {
        ProposalApiError::BadRequest(rejection.body_text())
    }
}

impl From<PlanProposalError> for ProposalApiError {
    fn from(err: PlanProposalError) -> Self {
        match err {
            PlanProposalError::InvalidAnswers(e) => ProposalApiError::InvalidAnswers {
                field: e.field().to_string(),
                message: e.to_string(),
            },
        }
    }
}

impl From<GenerateProposalError> for ProposalApiError {
    fn from(err: GenerateProposalError) -> Self {
        match err {
            GenerateProposalError::InvalidAnswers(e) => ProposalApiError::InvalidAnswers {
                field: e.field().to_string(),
                message: e.to_string(),
            },
            GenerateProposalError::Narrative(e) => ProposalApiError::Internal(e.to_string()),
            GenerateProposalError::Render(e) => ProposalApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ProposalApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ProposalApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            ProposalApiError::InvalidAnswers { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::bad_request(message).with_details(json!({ "field": field })),
            ),
            ProposalApiError::Internal(detail) => {
                tracing::error!(error = %detail, "proposal generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal(GENERATION_FAILED),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}
