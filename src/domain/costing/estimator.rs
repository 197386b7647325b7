//! Role-by-phase effort and cost aggregation.

use super::estimate::{round2, CostEstimate, CostLine, PhaseCost};
use crate::domain::catalog::{ComplexityTable, RateCard};
use crate::domain::schedule::ScheduledPhase;
use crate::domain::wizard::{EnrichedAnswers, RoleAllocation};

/// A single person cannot be staffed beyond full time.
const MAX_FTE_PERCENT: f64 = 100.0;

/// A role that passed validation, with its interpreted numbers.
struct StaffedRole<'r> {
    allocation: &'r RoleAllocation,
    quantity: f64,
    fte_fraction: f64,
    hourly_rate: f64,
}

/// Computes the cost estimate for a schedule.
///
/// Each (phase, role) pair contributes
/// `quantity × fte/100 × business days × hours per day` hours at the role's
/// hourly rate. Phase costs are summed into the sub-total, which is scaled
/// by the selected complexity multiplier. Problems with the input never
/// fail the estimate; they are listed in [`CostEstimate::notes`].
pub struct CostEstimator<'a> {
    rates: &'a RateCard,
    complexity: &'a ComplexityTable,
}

impl<'a> CostEstimator<'a> {
    pub fn new(rates: &'a RateCard, complexity: &'a ComplexityTable) -> Self {
        Self { rates, complexity }
    }

    pub fn estimate(&self, answers: &EnrichedAnswers, phases: &[ScheduledPhase]) -> CostEstimate {
        let mut notes = Vec::new();
        push_note(
            &mut notes,
            format!("Assumed {} working hours per day.", self.rates.hours_per_day()),
        );
        let currency = answers
            .currency()
            .unwrap_or(self.rates.fallback_currency())
            .to_string();

        let plan = match answers.resourcing.as_ref().filter(|plan| !plan.is_empty()) {
            Some(plan) => plan,
            None => {
                tracing::info!("no resourcing data, returning zero estimate");
                push_note(
                    &mut notes,
                    "No resourcing information provided; cost estimation will be zero.",
                );
                return CostEstimate {
                    cost_by_phase: Vec::new(),
                    sub_total: 0.0,
                    complexity_adjustment_factor: ComplexityTable::DEFAULT_MULTIPLIER,
                    complexity_adjustment_name: None,
                    total: 0.0,
                    currency,
                    notes,
                };
            }
        };

        let hours_per_day = self.rates.hours_per_day();
        let costed_days: f64 = phases
            .iter()
            .filter(|phase| phase.is_resolved())
            .map(|phase| f64::from(phase.business_days))
            .sum();
        let factor = answers
            .complexity_id()
            .and_then(|id| self.complexity.get(id))
            .map_or(ComplexityTable::DEFAULT_MULTIPLIER, |level| level.multiplier);
        let roles = self.staffed_roles(plan.all_roles(), costed_days * factor, &mut notes);

        let mut cost_by_phase = Vec::with_capacity(phases.len());
        let mut sub_total = 0.0;

        for phase in phases {
            if !phase.is_resolved() {
                push_note(
                    &mut notes,
                    format!(
                        "Skipping cost estimation for phase '{}' because it could not be scheduled.",
                        phase.name()
                    ),
                );
                continue;
            }

            let days = f64::from(phase.business_days);
            if phase.business_days == 0 {
                push_note(
                    &mut notes,
                    format!("Phase '{}' has zero duration; its cost will be zero.", phase.name()),
                );
            }

            let mut phase_hours = 0.0;
            let mut phase_cost = 0.0;
            let mut breakdown = Vec::new();

            for role in &roles {
                let hours = role.quantity * role.fte_fraction * days * hours_per_day;
                let cost = hours * role.hourly_rate;
                if hours > 0.0 {
                    breakdown.push(CostLine {
                        role_id: role.allocation.role_id.clone(),
                        role_name: role.allocation.role_name.clone(),
                        quantity: role.allocation.quantity.clone(),
                        fte: role.allocation.fte.clone(),
                        hourly_rate: role.hourly_rate,
                        effort_hours: round2(hours),
                        cost: round2(cost),
                    });
                }
                phase_hours += hours;
                phase_cost += cost;
            }

            tracing::debug!(
                phase = %phase.id(),
                effort_hours = phase_hours,
                cost = phase_cost,
                "phase costed"
            );
            cost_by_phase.push(PhaseCost {
                phase_id: phase.id().to_string(),
                phase_name: phase.name().to_string(),
                business_days: phase.business_days,
                effort_hours: round2(phase_hours),
                cost: round2(phase_cost),
                roles_breakdown: breakdown,
            });
            sub_total += phase_cost;
        }

        let (factor, complexity_name) = self.complexity_adjustment(answers, &mut notes);
        let total = sub_total * factor;

        tracing::info!(
            sub_total = sub_total,
            factor = factor,
            total = total,
            currency = %currency,
            "cost estimate computed"
        );

        CostEstimate {
            cost_by_phase,
            sub_total: round2(sub_total),
            complexity_adjustment_factor: factor,
            complexity_adjustment_name: complexity_name,
            total: round2(total),
            currency,
            notes,
        }
    }

    /// Roles with usable numbers, with their hourly rates resolved.
    ///
    /// FTE is capped at 100%. A role is dropped when its cost over
    /// `weighted_days` would not fit in an `f64`.
    fn staffed_roles<'r>(
        &self,
        allocations: impl Iterator<Item = &'r RoleAllocation>,
        weighted_days: f64,
        notes: &mut Vec<String>,
    ) -> Vec<StaffedRole<'r>> {
        let hours_per_day = self.rates.hours_per_day();
        let mut projected_total = 0.0;
        let mut staffed = Vec::new();
        for allocation in allocations {
            if allocation.quantity.value().is_none() || allocation.fte.value().is_none() {
                push_note(
                    notes,
                    format!(
                        "Role '{}' was skipped because its quantity or FTE is not a number.",
                        allocation.role_name
                    ),
                );
                continue;
            }
            // Zero or negative staffing is a deliberate "not needed".
            let (Some(quantity), Some(fte)) =
                (allocation.quantity.positive(), allocation.fte.positive())
            else {
                continue;
            };

            let fte = if fte > MAX_FTE_PERCENT {
                push_note(
                    notes,
                    format!(
                        "Role '{}' has an FTE of {}%; it is capped at {}%.",
                        allocation.role_name, allocation.fte, MAX_FTE_PERCENT
                    ),
                );
                MAX_FTE_PERCENT
            } else {
                fte
            };

            let hourly_rate = self.rates.hourly_rate(&allocation.role_id);
            let role_total =
                quantity * (fte / 100.0) * hours_per_day * hourly_rate * weighted_days;
            if !(projected_total + role_total).is_finite() {
                tracing::warn!(role = %allocation.role_id, "staffing figures overflow the estimate");
                push_note(
                    notes,
                    format!(
                        "Role '{}' was skipped because its staffing figures are too large to cost.",
                        allocation.role_name
                    ),
                );
                continue;
            }
            projected_total += role_total;

            if RateCard::is_custom_role(&allocation.role_id)
                && self.rates.explicit_rate(&allocation.role_id).is_none()
            {
                push_note(
                    notes,
                    format!(
                        "Custom role '{}' is using the default hourly rate of {}.",
                        allocation.role_name,
                        self.rates.default_hourly_rate()
                    ),
                );
            }

            staffed.push(StaffedRole {
                allocation,
                quantity,
                fte_fraction: fte / 100.0,
                hourly_rate,
            });
        }
        staffed
    }

    fn complexity_adjustment(
        &self,
        answers: &EnrichedAnswers,
        notes: &mut Vec<String>,
    ) -> (f64, Option<String>) {
        let Some(id) = answers.complexity_id() else {
            return (ComplexityTable::DEFAULT_MULTIPLIER, None);
        };

        match self.complexity.get(id) {
            Some(level) => {
                let name = answers.complexity_name().unwrap_or(&level.name).to_string();
                push_note(
                    notes,
                    format!(
                        "Applied complexity adjustment factor of {} for '{}'.",
                        level.multiplier, name
                    ),
                );
                (level.multiplier, Some(name))
            }
            None => {
                tracing::warn!(complexity = %id, "unknown complexity selection");
                push_note(
                    notes,
                    format!("Unknown project complexity '{}'; no adjustment applied.", id),
                );
                (ComplexityTable::DEFAULT_MULTIPLIER, Some(id.to_string()))
            }
        }
    }
}

fn push_note(notes: &mut Vec<String>, note: impl Into<String>) {
    let note = note.into();
    if !notes.contains(&note) {
        notes.push(note);
    }
}
