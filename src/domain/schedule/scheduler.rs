//! Dependency-ordered phase scheduling.

use std::collections::{HashMap, VecDeque};

use chrono::NaiveDate;

use super::business_days::add_business_days;
use super::duration::try_parse_business_days;
use super::phase::{Phase, ProjectSchedule, ScheduledPhase};
use crate::domain::catalog::{DependencyGraph, MOBILE_PHASE_ID};

/// Places phases on the business-day calendar.
///
/// Phases are resolved in topological order (Kahn's algorithm). A phase
/// with no prerequisites in the request starts on the project start date;
/// otherwise it starts one business day after its latest prerequisite ends.
/// Prerequisites absent from the request are ignored. Phases caught in, or
/// downstream of, a dependency cycle are returned as unresolved.
pub struct PhaseScheduler<'a> {
    dependencies: &'a DependencyGraph,
}

impl<'a> PhaseScheduler<'a> {
    pub fn new(dependencies: &'a DependencyGraph) -> Self {
        Self { dependencies }
    }

    /// Schedules `phases` from `project_start`.
    ///
    /// When `include_mobile` is false the mobile development phase is
    /// dropped before scheduling. Never fails: problems are reported in
    /// [`ProjectSchedule::notes`].
    pub fn schedule(
        &self,
        project_start: NaiveDate,
        phases: &[Phase],
        include_mobile: bool,
    ) -> ProjectSchedule {
        let mut notes = Vec::new();
        let working = self.working_set(phases, include_mobile, &mut notes);
        let count = working.len();

        let index: HashMap<&str, usize> = working
            .iter()
            .enumerate()
            .map(|(i, phase)| (phase.id.as_str(), i))
            .collect();

        let durations: Vec<u32> = working
            .iter()
            .map(|phase| resolve_duration(phase, &mut notes))
            .collect();

        // Edges run prerequisite -> dependent, restricted to the working set.
        let mut prerequisites: Vec<Vec<usize>> = vec![Vec::new(); count];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];
        let mut in_degree = vec![0usize; count];
        for (i, phase) in working.iter().enumerate() {
            for prerequisite in self.dependencies.prerequisites(&phase.id) {
                match index.get(prerequisite.as_str()) {
                    Some(&j) => {
                        prerequisites[i].push(j);
                        dependents[j].push(i);
                        in_degree[i] += 1;
                    }
                    None => tracing::debug!(
                        phase = %phase.id,
                        prerequisite = %prerequisite,
                        "prerequisite not requested, ignoring"
                    ),
                }
            }
        }

        let mut queue: VecDeque<usize> = (0..count).filter(|&i| in_degree[i] == 0).collect();
        let mut windows: Vec<Option<(NaiveDate, NaiveDate)>> = vec![None; count];
        let mut resolution_order = Vec::with_capacity(count);

        while let Some(i) = queue.pop_front() {
            let latest_prerequisite_end = prerequisites[i]
                .iter()
                .filter_map(|&j| windows[j].map(|(_, end)| end))
                .max();

            let window = place(project_start, latest_prerequisite_end, durations[i]);
            let Some((start, end)) = window else {
                // Dependents stay blocked and end up unresolved as well.
                tracing::warn!(phase = %working[i].id, "phase runs past the supported calendar range");
                notes.push(format!(
                    "Phase '{}' could not be placed on the calendar; its duration is too long.",
                    working[i].name
                ));
                continue;
            };

            tracing::debug!(
                phase = %working[i].id,
                start = %start,
                end = %end,
                business_days = durations[i],
                "phase scheduled"
            );
            windows[i] = Some((start, end));
            resolution_order.push(i);

            for &k in &dependents[i] {
                in_degree[k] -= 1;
                if in_degree[k] == 0 {
                    queue.push_back(k);
                }
            }
        }

        let mut scheduled: Vec<ScheduledPhase> = resolution_order
            .iter()
            .filter_map(|&i| {
                windows[i].map(|(start, end)| {
                    ScheduledPhase::scheduled(working[i].clone(), durations[i], start, end)
                })
            })
            .collect();
        scheduled.sort_by_key(|phase| phase.start_date());

        let unresolved: Vec<ScheduledPhase> = (0..count)
            .filter(|&i| windows[i].is_none())
            .map(|i| ScheduledPhase::unresolved(working[i].clone()))
            .collect();

        if !unresolved.is_empty() {
            let names: Vec<&str> = unresolved.iter().map(ScheduledPhase::name).collect();
            tracing::warn!(
                unresolved = unresolved.len(),
                phases = ?names,
                "dependency chain could not be resolved"
            );
            for phase in &unresolved {
                notes.push(format!(
                    "Phase '{}' could not be scheduled because its dependencies are circular or can never complete; it is excluded from costing.",
                    phase.name()
                ));
            }
        }

        scheduled.extend(unresolved);
        ProjectSchedule {
            phases: scheduled,
            notes,
        }
    }

    /// Phases that take part in this schedule, in request order.
    fn working_set(
        &self,
        phases: &[Phase],
        include_mobile: bool,
        notes: &mut Vec<String>,
    ) -> Vec<Phase> {
        let mut working: Vec<Phase> = Vec::with_capacity(phases.len());
        for phase in phases {
            if !include_mobile && phase.id == MOBILE_PHASE_ID {
                continue;
            }
            if working.iter().any(|p| p.id == phase.id) {
                notes.push(format!(
                    "Phase '{}' was listed more than once; only the first entry is scheduled.",
                    phase.name
                ));
                continue;
            }
            working.push(phase.clone());
        }
        working
    }
}

/// Start and end dates for a phase of `business_days` length.
fn place(
    project_start: NaiveDate,
    latest_prerequisite_end: Option<NaiveDate>,
    business_days: u32,
) -> Option<(NaiveDate, NaiveDate)> {
    let start = match latest_prerequisite_end {
        Some(end) => add_business_days(end, 1)?,
        None => project_start,
    };
    let end = add_business_days(start, business_days.max(1) - 1)?;
    Some((start, end))
}

fn resolve_duration(phase: &Phase, notes: &mut Vec<String>) -> u32 {
    let text = phase.duration.as_deref().unwrap_or("").trim();
    if text.is_empty() {
        notes.push(format!(
            "No duration given for phase '{}'; it is shown as one business day and costed as zero days.",
            phase.name
        ));
        return 0;
    }
    match try_parse_business_days(text) {
        Some(days) => days,
        None => {
            tracing::warn!(phase = %phase.id, duration = %text, "unparseable phase duration");
            notes.push(format!(
                "Could not read duration '{}' for phase '{}'; it is shown as one business day and costed as zero days.",
                text, phase.name
            ));
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::is_business_day;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monday() -> NaiveDate {
        date(2024, 6, 3)
    }

    fn phase(id: &str, duration: &str) -> Phase {
        Phase::new(id, id, Some(duration.to_string()))
    }

    fn find<'s>(schedule: &'s ProjectSchedule, id: &str) -> &'s ScheduledPhase {
        schedule.phases.iter().find(|p| p.id() == id).unwrap()
    }

    // ───────────────────────────────────────────────────────────────
    // Basic placement
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn independent_phase_starts_on_project_start() {
        let graph = DependencyGraph::new();
        let schedule = PhaseScheduler::new(&graph).schedule(
            monday(),
            &[phase("discovery_planning", "2 weeks")],
            false,
        );

        let discovery = find(&schedule, "discovery_planning");
        assert_eq!(discovery.start_date(), Some(monday()));
        assert_eq!(discovery.end_date(), Some(date(2024, 6, 14)));
        assert_eq!(discovery.business_days, 10);
        assert!(schedule.notes.is_empty());
    }

    #[test]
    fn dependent_starts_next_business_day_after_prerequisite() {
        let graph = DependencyGraph::new().with_dependency("b", ["a"]);
        let schedule = PhaseScheduler::new(&graph).schedule(
            monday(),
            &[phase("a", "1 week"), phase("b", "3 days")],
            false,
        );

        assert_eq!(find(&schedule, "a").end_date(), Some(date(2024, 6, 7)));
        assert_eq!(find(&schedule, "b").start_date(), Some(date(2024, 6, 10)));
        assert_eq!(find(&schedule, "b").end_date(), Some(date(2024, 6, 12)));
    }

    #[test]
    fn dependent_waits_for_latest_prerequisite() {
        let graph = DependencyGraph::new().with_dependency("c", ["a", "b"]);
        let schedule = PhaseScheduler::new(&graph).schedule(
            monday(),
            &[phase("a", "2 days"), phase("b", "2 weeks"), phase("c", "1 day")],
            false,
        );

        assert_eq!(find(&schedule, "c").start_date(), Some(date(2024, 6, 17)));
    }

    #[test]
    fn prerequisite_listed_after_dependent_still_orders_correctly() {
        let graph = DependencyGraph::new().with_dependency("b", ["a"]);
        let schedule = PhaseScheduler::new(&graph).schedule(
            monday(),
            &[phase("b", "1 day"), phase("a", "1 day")],
            false,
        );

        assert_eq!(find(&schedule, "a").start_date(), Some(monday()));
        assert_eq!(find(&schedule, "b").start_date(), Some(date(2024, 6, 4)));
        assert_eq!(schedule.phases[0].id(), "a");
    }

    #[test]
    fn output_is_sorted_by_start_date() {
        let graph = DependencyGraph::standard();
        let phases = vec![
            phase("uat", "1 week"),
            phase("deployment", "1 week"),
            phase("discovery_planning", "1 week"),
            phase("design_ux_ui", "1 week"),
        ];
        let schedule = PhaseScheduler::new(&graph).schedule(monday(), &phases, false);

        let starts: Vec<_> = schedule.phases.iter().map(|p| p.start_date()).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }

    // ───────────────────────────────────────────────────────────────
    // Zero and unreadable durations
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn unreadable_duration_occupies_one_day_and_costs_zero() {
        let graph = DependencyGraph::new().with_dependency("b", ["a"]);
        let schedule = PhaseScheduler::new(&graph).schedule(
            monday(),
            &[phase("a", "X weeks"), phase("b", "1 day")],
            false,
        );

        let a = find(&schedule, "a");
        assert_eq!(a.business_days, 0);
        assert_eq!(a.start_date(), a.end_date());
        assert_eq!(find(&schedule, "b").start_date(), Some(date(2024, 6, 4)));
        assert_eq!(schedule.notes.len(), 1);
        assert!(schedule.notes[0].contains("X weeks"));
    }

    #[test]
    fn missing_duration_is_noted() {
        let graph = DependencyGraph::new();
        let schedule = PhaseScheduler::new(&graph).schedule(
            monday(),
            &[Phase::new("a", "Alpha", None)],
            false,
        );

        assert_eq!(find(&schedule, "a").business_days, 0);
        assert!(schedule.notes[0].contains("Alpha"));
    }

    // ───────────────────────────────────────────────────────────────
    // Mobile exclusion
    // ───────────────────────────────────────────────────────────────

    fn lifecycle() -> Vec<Phase> {
        vec![
            phase("discovery_planning", "1 week"),
            phase("design_ux_ui", "1 week"),
            phase("development_backend", "1 week"),
            phase("development_frontend", "1 week"),
            phase("development_mobile", "2 weeks"),
            phase("testing_qa", "1 week"),
        ]
    }

    #[test]
    fn mobile_phase_dropped_when_excluded() {
        let graph = DependencyGraph::standard();
        let schedule = PhaseScheduler::new(&graph).schedule(monday(), &lifecycle(), false);

        assert!(schedule.phases.iter().all(|p| p.id() != MOBILE_PHASE_ID));
        assert!(schedule.phases.iter().all(ScheduledPhase::is_resolved));
        // testing waits only for frontend (week 4), not for the missing mobile phase
        assert_eq!(
            find(&schedule, "testing_qa").start_date(),
            Some(date(2024, 7, 1))
        );
    }

    #[test]
    fn mobile_phase_scheduled_when_included() {
        let graph = DependencyGraph::standard();
        let schedule = PhaseScheduler::new(&graph).schedule(monday(), &lifecycle(), true);

        let mobile = find(&schedule, MOBILE_PHASE_ID);
        // mobile runs after design, in parallel with backend
        assert_eq!(mobile.start_date(), Some(date(2024, 6, 17)));
        assert_eq!(mobile.end_date(), Some(date(2024, 6, 28)));
        assert_eq!(
            find(&schedule, "testing_qa").start_date(),
            Some(date(2024, 7, 1))
        );
    }

    // ───────────────────────────────────────────────────────────────
    // Cycles
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn mutual_dependency_is_unresolved_while_others_resolve() {
        let graph = DependencyGraph::new()
            .with_dependency("a", ["b"])
            .with_dependency("b", ["a"]);
        let schedule = PhaseScheduler::new(&graph).schedule(
            monday(),
            &[phase("a", "1 week"), phase("b", "1 week"), phase("c", "1 week")],
            false,
        );

        assert!(!find(&schedule, "a").is_resolved());
        assert!(!find(&schedule, "b").is_resolved());
        assert_eq!(find(&schedule, "a").business_days, 0);
        assert_eq!(find(&schedule, "c").start_date(), Some(monday()));
        assert_eq!(schedule.phases[0].id(), "c");
        assert_eq!(schedule.unresolved().count(), 2);
        assert_eq!(schedule.notes.len(), 2);
    }

    #[test]
    fn phases_downstream_of_a_cycle_are_unresolved() {
        let graph = DependencyGraph::new()
            .with_dependency("a", ["b"])
            .with_dependency("b", ["a"])
            .with_dependency("c", ["a"]);
        let schedule = PhaseScheduler::new(&graph).schedule(
            monday(),
            &[phase("a", "1 week"), phase("b", "1 week"), phase("c", "1 week")],
            false,
        );

        assert_eq!(schedule.unresolved().count(), 3);
    }

    #[test]
    fn self_dependency_is_unresolved() {
        let graph = DependencyGraph::new().with_dependency("a", ["a"]);
        let schedule =
            PhaseScheduler::new(&graph).schedule(monday(), &[phase("a", "1 week")], false);

        assert!(!find(&schedule, "a").is_resolved());
    }

    #[test]
    fn duplicate_phase_ids_keep_first_entry() {
        let graph = DependencyGraph::new();
        let schedule = PhaseScheduler::new(&graph).schedule(
            monday(),
            &[phase("a", "1 week"), phase("a", "3 weeks")],
            false,
        );

        assert_eq!(schedule.phases.len(), 1);
        assert_eq!(schedule.phases[0].business_days, 5);
        assert_eq!(schedule.notes.len(), 1);
    }

    #[test]
    fn scheduling_is_deterministic() {
        let graph = DependencyGraph::standard();
        let scheduler = PhaseScheduler::new(&graph);
        let first = scheduler.schedule(monday(), &lifecycle(), true);
        let second = scheduler.schedule(monday(), &lifecycle(), true);
        assert_eq!(first, second);
    }

    // ───────────────────────────────────────────────────────────────
    // Properties
    // ───────────────────────────────────────────────────────────────

    const STANDARD_IDS: [&str; 8] = [
        "discovery_planning",
        "design_ux_ui",
        "development_backend",
        "development_frontend",
        "development_mobile",
        "testing_qa",
        "deployment",
        "uat",
    ];

    proptest! {
        #[test]
        fn dependents_start_the_business_day_after_their_last_prerequisite(
            days in proptest::collection::vec(0u32..40, 8),
            include_mobile in any::<bool>(),
        ) {
            let graph = DependencyGraph::standard();
            let phases: Vec<Phase> = STANDARD_IDS
                .iter()
                .zip(&days)
                .map(|(id, d)| phase(id, &format!("{} days", d)))
                .collect();

            let schedule = PhaseScheduler::new(&graph).schedule(monday(), &phases, include_mobile);

            for scheduled in &schedule.phases {
                prop_assert!(scheduled.is_resolved());
                let start = scheduled.start_date().unwrap();
                let end = scheduled.end_date().unwrap();
                prop_assert!(is_business_day(start));
                prop_assert!(start <= end);

                let latest = graph
                    .prerequisites(scheduled.id())
                    .iter()
                    .filter_map(|id| schedule.phases.iter().find(|p| p.id() == id))
                    .filter_map(ScheduledPhase::end_date)
                    .max();
                match latest {
                    Some(prerequisite_end) => {
                        prop_assert_eq!(Some(start), add_business_days(prerequisite_end, 1));
                    }
                    None => prop_assert_eq!(start, monday()),
                }
            }
        }
    }
}
