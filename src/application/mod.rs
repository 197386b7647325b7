//! Application layer - Command handlers.
//!
//! This layer sequences domain services and coordinates the rendering
//! ports. It holds no business rules of its own.

pub mod handlers;

pub use handlers::{
    GenerateProposalCommand, GenerateProposalError, GenerateProposalHandler,
    GenerateProposalResult, OutputFormat, PlanProposalCommand, PlanProposalError,
    PlanProposalHandler, ProposalOutput, ProposalPlan,
};
