//! Proposal handlers - planning and full document generation.

mod generate_proposal;
mod plan_proposal;

pub use generate_proposal::{
    GenerateProposalCommand, GenerateProposalError, GenerateProposalHandler,
    GenerateProposalResult, OutputFormat, ProposalOutput,
};
pub use plan_proposal::{
    PlanProposalCommand, PlanProposalError, PlanProposalHandler, ProposalPlan,
    NO_START_DATE_NOTE,
};
