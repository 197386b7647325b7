//! Effort and cost estimation over a computed schedule.

mod estimate;
mod estimator;

pub use estimate::{format_amount, round2, CostEstimate, CostLine, PhaseCost};
pub use estimator::CostEstimator;
