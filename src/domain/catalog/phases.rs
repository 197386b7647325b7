//! Phase catalog and the static phase dependency graph.

use std::collections::BTreeMap;

/// Identifier of the mobile development phase, which is only scheduled for
/// projects that target mobile.
pub const MOBILE_PHASE_ID: &str = "development_mobile";

/// A phase the proposal can schedule, with its display name and the
/// duration used when the questionnaire leaves it blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseDefinition {
    pub id: String,
    pub name: String,
    pub default_duration: String,
}

impl PhaseDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        default_duration: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            default_duration: default_duration.into(),
        }
    }
}

/// Ordered list of known phases.
///
/// The order is the canonical presentation order and is used to sequence
/// phases taken from the questionnaire's duration map.
#[derive(Debug, Clone, Default)]
pub struct PhaseCatalog {
    phases: Vec<PhaseDefinition>,
}

impl PhaseCatalog {
    pub fn new(phases: Vec<PhaseDefinition>) -> Self {
        Self { phases }
    }

    /// The standard delivery lifecycle.
    ///
    /// The development phases carry placeholder defaults ("X weeks") that
    /// do not parse, so an unfilled development phase shows up in the notes
    /// instead of silently getting an invented duration.
    pub fn standard() -> Self {
        Self::new(vec![
            PhaseDefinition::new("discovery_planning", "Discovery & Planning", "2-4 weeks"),
            PhaseDefinition::new("design_ux_ui", "Design (UI/UX)", "3-6 weeks"),
            PhaseDefinition::new("development_backend", "Development (Backend)", "X weeks"),
            PhaseDefinition::new("development_frontend", "Development (Frontend)", "Y weeks"),
            PhaseDefinition::new(
                MOBILE_PHASE_ID,
                "Mobile App Development (if applicable)",
                "Z weeks",
            ),
            PhaseDefinition::new("testing_qa", "Testing & QA", "2-4 weeks"),
            PhaseDefinition::new("deployment", "Deployment", "1-2 weeks"),
            PhaseDefinition::new("uat", "User Acceptance Testing (UAT)", "1-2 weeks"),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&PhaseDefinition> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Position of a phase in the canonical order, if known.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.phases.iter().position(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhaseDefinition> {
        self.phases.iter()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

/// Static mapping from a phase id to the phases that must finish before it.
///
/// Prerequisites may name phases that are not part of a given request (the
/// mobile phase for a web-only project); the scheduler ignores those.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    prerequisites: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds prerequisites for a phase, keeping any already declared.
    pub fn with_dependency<I, S>(mut self, phase_id: impl Into<String>, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.prerequisites.entry(phase_id.into()).or_default();
        for prerequisite in prerequisites {
            let prerequisite = prerequisite.into();
            if !entry.contains(&prerequisite) {
                entry.push(prerequisite);
            }
        }
        self
    }

    /// Dependencies of the standard phase catalog.
    pub fn standard() -> Self {
        Self::new()
            .with_dependency("design_ux_ui", ["discovery_planning"])
            .with_dependency("development_backend", ["design_ux_ui"])
            .with_dependency("development_frontend", ["development_backend"])
            .with_dependency(MOBILE_PHASE_ID, ["design_ux_ui"])
            .with_dependency(
                "testing_qa",
                ["development_frontend", MOBILE_PHASE_ID, "development_backend"],
            )
            .with_dependency("deployment", ["testing_qa"])
            .with_dependency("uat", ["deployment"])
    }

    /// Phases that must complete before `phase_id` can start.
    pub fn prerequisites(&self, phase_id: &str) -> &[String] {
        self.prerequisites
            .get(phase_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_lists_phases_in_delivery_order() {
        let catalog = PhaseCatalog::standard();
        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "discovery_planning",
                "design_ux_ui",
                "development_backend",
                "development_frontend",
                "development_mobile",
                "testing_qa",
                "deployment",
                "uat",
            ]
        );
    }

    #[test]
    fn lookup_returns_name_and_default_duration() {
        let catalog = PhaseCatalog::standard();
        let phase = catalog.get("testing_qa").unwrap();
        assert_eq!(phase.name, "Testing & QA");
        assert_eq!(phase.default_duration, "2-4 weeks");
        assert!(catalog.get("unknown").is_none());
    }

    #[test]
    fn position_follows_catalog_order() {
        let catalog = PhaseCatalog::standard();
        assert_eq!(catalog.position("discovery_planning"), Some(0));
        assert_eq!(catalog.position("uat"), Some(7));
        assert_eq!(catalog.position("nope"), None);
    }

    #[test]
    fn standard_graph_declares_prerequisites() {
        let graph = DependencyGraph::standard();
        assert!(graph.prerequisites("discovery_planning").is_empty());
        assert_eq!(graph.prerequisites("uat"), ["deployment".to_string()]);
        assert_eq!(graph.prerequisites("testing_qa").len(), 3);
        assert!(graph
            .prerequisites("testing_qa")
            .contains(&MOBILE_PHASE_ID.to_string()));
    }

    #[test]
    fn with_dependency_merges_without_duplicates() {
        let graph = DependencyGraph::new()
            .with_dependency("b", ["a"])
            .with_dependency("b", ["a", "c"]);
        assert_eq!(graph.prerequisites("b"), ["a".to_string(), "c".to_string()]);
    }
}
