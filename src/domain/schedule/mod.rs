//! Timeline derivation: duration parsing, business-day arithmetic and
//! dependency-ordered phase scheduling.
//!
//! All functions are pure; the only input besides the request data is the
//! injected [`DependencyGraph`](crate::domain::catalog::DependencyGraph).

mod business_days;
mod duration;
mod phase;
mod scheduler;

pub use business_days::{add_business_days, is_business_day, next_business_day};
pub use duration::{parse_business_days, try_parse_business_days, DAYS_PER_WEEK};
pub use phase::{Phase, PhaseWindow, ProjectSchedule, ScheduledPhase};
pub use scheduler::PhaseScheduler;
