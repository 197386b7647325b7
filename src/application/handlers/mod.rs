//! Application handlers.
//!
//! Command handlers that orchestrate domain services and ports.

pub mod proposal;

pub use proposal::{
    GenerateProposalCommand, GenerateProposalError, GenerateProposalHandler,
    GenerateProposalResult, OutputFormat, PlanProposalCommand, PlanProposalError,
    PlanProposalHandler, ProposalOutput, ProposalPlan,
};
