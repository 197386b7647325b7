//! Questionnaire answers: the raw payload and its enriched form.
//!
//! Enrichment resolves option ids to display names, parses the project
//! start date and builds the requested phase list from the phase catalog.

mod answers;
mod enriched;
mod numeric;

pub use answers::{
    ApplicationAnswers, ApplicationType, ComplianceAnswers, DeploymentAnswers, IndustryAnswers,
    IntegrationAnswers, LocalizationAnswers, ModuleAnswers, PricingAnswers, ResourcingAnswers,
    RoleAnswer, TimelineAnswers, WizardAnswers,
};
pub use enriched::{
    ApplicationProfile, ComplianceScope, DeploymentProfile, EnrichedAnswers, FunctionalScope,
    IndustryProfile, IntegrationScope, LocalizationProfile, NamedOption, PricingPreferences,
    ResourcingPlan, RoleAllocation, SelectedModule, TimelinePlan,
};
pub use numeric::NumericInput;
