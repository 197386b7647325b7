//! Phases and their computed calendar placement.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A delivery phase as requested for one proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl Phase {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
        }
    }
}

/// Where a phase sits on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PhaseWindow {
    Scheduled {
        #[serde(rename = "startDate")]
        start_date: NaiveDate,
        #[serde(rename = "endDate")]
        end_date: NaiveDate,
    },
    /// Dependencies could not be satisfied (a cycle, or a chain leading
    /// into one).
    Unresolved,
}

/// A phase with its resolved duration and calendar window.
///
/// `business_days` is the parsed duration and is what costing uses. The
/// window always spans at least one business day, so a phase whose
/// duration parses to 0 still appears on the timeline but costs nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPhase {
    #[serde(flatten)]
    pub phase: Phase,
    pub business_days: u32,
    #[serde(flatten)]
    pub window: PhaseWindow,
}

impl ScheduledPhase {
    pub fn scheduled(phase: Phase, business_days: u32, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            phase,
            business_days,
            window: PhaseWindow::Scheduled {
                start_date: start,
                end_date: end,
            },
        }
    }

    pub fn unresolved(phase: Phase) -> Self {
        Self {
            phase,
            business_days: 0,
            window: PhaseWindow::Unresolved,
        }
    }

    pub fn id(&self) -> &str {
        &self.phase.id
    }

    pub fn name(&self) -> &str {
        &self.phase.name
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.window, PhaseWindow::Scheduled { .. })
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        match self.window {
            PhaseWindow::Scheduled { start_date, .. } => Some(start_date),
            PhaseWindow::Unresolved => None,
        }
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        match self.window {
            PhaseWindow::Scheduled { end_date, .. } => Some(end_date),
            PhaseWindow::Unresolved => None,
        }
    }
}

/// Scheduler output: phases ordered by start date, unresolved ones last,
/// plus notes describing every degradation met along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSchedule {
    pub phases: Vec<ScheduledPhase>,
    pub notes: Vec<String>,
}

impl ProjectSchedule {
    /// A schedule with no phases, explaining why.
    pub fn unscheduled(note: impl Into<String>) -> Self {
        Self {
            phases: Vec::new(),
            notes: vec![note.into()],
        }
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &ScheduledPhase> {
        self.phases.iter().filter(|p| !p.is_resolved())
    }

    /// First scheduled day across all resolved phases.
    pub fn project_start(&self) -> Option<NaiveDate> {
        self.phases.iter().filter_map(ScheduledPhase::start_date).min()
    }

    /// Last scheduled day across all resolved phases.
    pub fn project_end(&self) -> Option<NaiveDate> {
        self.phases.iter().filter_map(ScheduledPhase::end_date).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn discovery() -> Phase {
        Phase::new("discovery_planning", "Discovery & Planning", Some("2 weeks".to_string()))
    }

    #[test]
    fn scheduled_phase_serializes_flat_with_dates() {
        let phase = ScheduledPhase::scheduled(discovery(), 10, date(2024, 6, 3), date(2024, 6, 14));
        let value = serde_json::to_value(&phase).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "discovery_planning",
                "name": "Discovery & Planning",
                "duration": "2 weeks",
                "businessDays": 10,
                "status": "scheduled",
                "startDate": "2024-06-03",
                "endDate": "2024-06-14"
            })
        );
    }

    #[test]
    fn unresolved_phase_serializes_marker_without_dates() {
        let value = serde_json::to_value(ScheduledPhase::unresolved(discovery())).unwrap();
        assert_eq!(value["status"], "unresolved");
        assert_eq!(value["businessDays"], 0);
        assert!(value.get("startDate").is_none());
    }

    #[test]
    fn accessors_expose_window() {
        let resolved = ScheduledPhase::scheduled(discovery(), 10, date(2024, 6, 3), date(2024, 6, 14));
        assert!(resolved.is_resolved());
        assert_eq!(resolved.start_date(), Some(date(2024, 6, 3)));
        assert_eq!(resolved.end_date(), Some(date(2024, 6, 14)));

        let unresolved = ScheduledPhase::unresolved(discovery());
        assert!(!unresolved.is_resolved());
        assert_eq!(unresolved.start_date(), None);
    }

    #[test]
    fn project_bounds_ignore_unresolved_phases() {
        let schedule = ProjectSchedule {
            phases: vec![
                ScheduledPhase::scheduled(discovery(), 10, date(2024, 6, 3), date(2024, 6, 14)),
                ScheduledPhase::scheduled(discovery(), 5, date(2024, 6, 17), date(2024, 6, 21)),
                ScheduledPhase::unresolved(discovery()),
            ],
            notes: vec![],
        };
        assert_eq!(schedule.project_start(), Some(date(2024, 6, 3)));
        assert_eq!(schedule.project_end(), Some(date(2024, 6, 21)));
        assert_eq!(schedule.unresolved().count(), 1);
    }

    #[test]
    fn unscheduled_carries_note() {
        let schedule = ProjectSchedule::unscheduled("no start date");
        assert!(schedule.phases.is_empty());
        assert_eq!(schedule.notes, vec!["no start date".to_string()]);
    }
}
