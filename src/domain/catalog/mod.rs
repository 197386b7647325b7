//! Read-only reference tables for proposal generation.
//!
//! Everything here is built once at start-up and shared behind an `Arc`;
//! scheduling and costing receive the tables they need at construction.

mod options;
mod phases;
mod rates;

pub use options::{ModuleDefinition, NameLookup, OptionNames};
pub use phases::{DependencyGraph, PhaseCatalog, PhaseDefinition, MOBILE_PHASE_ID};
pub use rates::{
    ComplexityLevel, ComplexityTable, RateCard, CUSTOM_ROLE_PREFIX, DEFAULT_HOURLY_RATE,
    FALLBACK_CURRENCY, HOURS_PER_DAY,
};

/// All static tables used by one service instance.
#[derive(Debug, Clone)]
pub struct ProposalCatalog {
    pub phases: PhaseCatalog,
    pub dependencies: DependencyGraph,
    pub rates: RateCard,
    pub complexity: ComplexityTable,
    pub names: OptionNames,
}

impl ProposalCatalog {
    /// The built-in tables.
    pub fn standard() -> Self {
        Self {
            phases: PhaseCatalog::standard(),
            dependencies: DependencyGraph::standard(),
            rates: RateCard::standard(),
            complexity: ComplexityTable::standard(),
            names: OptionNames::standard(),
        }
    }

    /// Replaces the rate card, keeping the other tables.
    pub fn with_rates(mut self, rates: RateCard) -> Self {
        self.rates = rates;
        self
    }
}

impl Default for ProposalCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
