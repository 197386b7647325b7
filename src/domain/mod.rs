//! Domain layer containing the proposal business rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, validation errors)
//! - `catalog` - Phase, dependency, rate and option-name tables
//! - `wizard` - Questionnaire answers and their enriched form
//! - `schedule` - Duration parsing and business-day phase scheduling
//! - `costing` - Role-by-phase effort and cost estimation

pub mod catalog;
pub mod costing;
pub mod foundation;
pub mod schedule;
pub mod wizard;
