//! Questionnaire answers with display names resolved and dates parsed.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use super::answers::{
    ApplicationType, LocalizationAnswers, PricingAnswers, RoleAnswer, TimelineAnswers,
    WizardAnswers,
};
use super::numeric::NumericInput;
use crate::domain::catalog::{NameLookup, ProposalCatalog, MOBILE_PHASE_ID};
use crate::domain::foundation::ValidationError;
use crate::domain::schedule::Phase;

/// Placeholder duration for phases with neither an answer nor a default.
const UNKNOWN_DURATION: &str = "N/A";

/// Name given to custom roles submitted without one.
const UNNAMED_CUSTOM_ROLE: &str = "Unnamed Custom Role";

/// Label of the free-text choice in select widgets.
const OTHER_OPTION_PREFIX: &str = "Other";

/// An option id paired with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedOption {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationProfile {
    pub application_type: Option<ApplicationType>,
    pub application_type_name: Option<String>,
    pub mobile_platforms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryProfile {
    pub industry: Option<String>,
    pub other_industry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedModule {
    pub id: String,
    pub name: String,
    pub sub_modules: Vec<NamedOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionalScope {
    pub selected_modules: Vec<SelectedModule>,
    pub other_modules_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationScope {
    pub selected_integrations: Vec<NamedOption>,
    pub other_integrations_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentProfile {
    pub deployment_environment: Option<String>,
    pub deployment_environment_name: Option<String>,
    pub preferred_region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePlan {
    pub project_start_date: Option<NaiveDate>,
    pub project_completion_date: Option<String>,
    pub phases: Vec<Phase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizationProfile {
    pub target_regions: Vec<NamedOption>,
    pub europe_countries: Option<String>,
    pub africa_countries: Option<String>,
    pub multi_language_support: bool,
    pub selected_languages: Vec<String>,
    pub other_language: Option<String>,
    pub currency_localization: bool,
    pub selected_currencies: Vec<String>,
    pub other_currency: Option<String>,
    pub timezone_support: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceScope {
    pub selected_compliance_options: Vec<NamedOption>,
    pub other_compliance_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPreferences {
    pub pricing_model: Option<String>,
    pub pricing_model_name: Option<String>,
    pub project_complexity: Option<String>,
    pub project_complexity_name: Option<String>,
    /// Chosen terms, with the free-text answer substituted for "Other".
    pub payment_terms: Option<String>,
    /// Currency code, or the free text given for an unlisted currency.
    pub proposal_currency: Option<String>,
    pub preferred_budget_range: Option<String>,
    pub ongoing_maintenance: bool,
    pub support_level: Option<String>,
    pub support_level_name: Option<String>,
    pub support_duration: Option<String>,
    pub support_duration_name: Option<String>,
}

/// One staffed role: how many people, at what fraction of full time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAllocation {
    pub role_id: String,
    pub role_name: String,
    pub quantity: NumericInput,
    /// Percentage of one full-time equivalent, 0-100.
    pub fte: NumericInput,
}

/// Catalog and custom roles requested for the project.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcingPlan {
    pub roles: Vec<RoleAllocation>,
    pub custom_roles: Vec<RoleAllocation>,
    pub team_location_preference: Option<String>,
    pub team_location_preference_name: Option<String>,
}

impl ResourcingPlan {
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty() && self.custom_roles.is_empty()
    }

    /// Catalog roles followed by custom roles.
    pub fn all_roles(&self) -> impl Iterator<Item = &RoleAllocation> {
        self.roles.iter().chain(self.custom_roles.iter())
    }
}

/// Questionnaire answers ready for scheduling, costing and narration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedAnswers {
    pub application: Option<ApplicationProfile>,
    pub industry: Option<IndustryProfile>,
    pub functional_scope: Option<FunctionalScope>,
    pub integrations: Option<IntegrationScope>,
    pub deployment: Option<DeploymentProfile>,
    pub timeline: Option<TimelinePlan>,
    pub localization: Option<LocalizationProfile>,
    pub compliance: Option<ComplianceScope>,
    pub pricing: Option<PricingPreferences>,
    pub resourcing: Option<ResourcingPlan>,
}

impl EnrichedAnswers {
    /// Resolves names against `catalog` and parses the start date.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFormat`] when a project start date
    /// is given but is not a calendar date.
    pub fn from_answers(
        answers: &WizardAnswers,
        catalog: &ProposalCatalog,
    ) -> Result<Self, ValidationError> {
        let names = &catalog.names;
        let application_type = answers.step1.as_ref().and_then(|s| s.application_type);
        let includes_mobile = application_type.is_some_and(|t| t.includes_mobile());

        let application = answers.step1.as_ref().map(|step| ApplicationProfile {
            application_type: step.application_type,
            application_type_name: step.application_type.map(|t| t.display_name().to_string()),
            mobile_platforms: step.mobile_platforms.iter().map(|p| platform_name(p)).collect(),
        });

        let industry = answers.step2.as_ref().map(|step| IndustryProfile {
            industry: non_empty(&step.industry),
            other_industry: non_empty(&step.other_industry),
        });

        let functional_scope = answers.step3.as_ref().map(|step| FunctionalScope {
            selected_modules: step
                .selected_modules
                .iter()
                .filter_map(|(module_id, sub_ids)| {
                    let definition = names.module(module_id)?;
                    Some(SelectedModule {
                        id: module_id.clone(),
                        name: definition.name.clone(),
                        sub_modules: sub_ids
                            .iter()
                            .map(|sub_id| NamedOption {
                                id: sub_id.clone(),
                                name: definition.sub_modules.name_or_id(sub_id).to_string(),
                            })
                            .collect(),
                    })
                })
                .collect(),
            other_modules_text: non_empty(&step.other_modules_text),
        });

        let integrations = answers.step4.as_ref().map(|step| IntegrationScope {
            selected_integrations: named(&step.selected_integrations, |id| {
                names.integrations.name_or_id(id)
            }),
            other_integrations_text: non_empty(&step.other_integrations_text),
        });

        let deployment = answers.step5.as_ref().map(|step| {
            let environment = non_empty(&step.deployment_environment);
            DeploymentProfile {
                deployment_environment_name: environment
                    .as_deref()
                    .and_then(|id| names.deployment_environments.name(id))
                    .map(str::to_string),
                deployment_environment: environment,
                preferred_region: non_empty(&step.preferred_region),
            }
        });

        let timeline = answers
            .step6
            .as_ref()
            .map(|step| timeline_plan(step, catalog, includes_mobile))
            .transpose()?;

        let localization = answers
            .step7
            .as_ref()
            .map(|step| localization_profile(step, catalog));

        let compliance = answers.step8.as_ref().map(|step| ComplianceScope {
            selected_compliance_options: named(&step.selected_compliance_options, |id| {
                names.compliance.name_or_id(id)
            }),
            other_compliance_text: non_empty(&step.other_compliance_text),
        });

        let pricing = answers
            .step9
            .as_ref()
            .map(|step| pricing_preferences(step, answers.step7.as_ref(), catalog));

        let resourcing = answers.step10.as_ref().map(|step| ResourcingPlan {
            roles: step
                .roles
                .iter()
                .filter(|role| role.is_selected != Some(false))
                .map(|role| catalog_role(role, catalog))
                .collect(),
            custom_roles: step.custom_roles.iter().map(custom_role).collect(),
            team_location_preference_name: step
                .team_location_preference
                .as_deref()
                .and_then(|id| names.team_locations.name(id))
                .map(str::to_string),
            team_location_preference: non_empty(&step.team_location_preference),
        });

        Ok(Self {
            application,
            industry,
            functional_scope,
            integrations,
            deployment,
            timeline,
            localization,
            compliance,
            pricing,
            resourcing,
        })
    }

    pub fn application_type(&self) -> Option<ApplicationType> {
        self.application.as_ref().and_then(|a| a.application_type)
    }

    /// Whether the mobile development phase should be scheduled.
    pub fn includes_mobile(&self) -> bool {
        self.application_type().is_some_and(|t| t.includes_mobile())
    }

    pub fn project_start_date(&self) -> Option<NaiveDate> {
        self.timeline.as_ref().and_then(|t| t.project_start_date)
    }

    pub fn phases(&self) -> &[Phase] {
        self.timeline
            .as_ref()
            .map(|t| t.phases.as_slice())
            .unwrap_or(&[])
    }

    pub fn complexity_id(&self) -> Option<&str> {
        self.pricing
            .as_ref()
            .and_then(|p| p.project_complexity.as_deref())
    }

    pub fn complexity_name(&self) -> Option<&str> {
        self.pricing
            .as_ref()
            .and_then(|p| p.project_complexity_name.as_deref())
    }

    pub fn currency(&self) -> Option<&str> {
        self.pricing
            .as_ref()
            .and_then(|p| p.proposal_currency.as_deref())
    }
}

fn timeline_plan(
    step: &TimelineAnswers,
    catalog: &ProposalCatalog,
    includes_mobile: bool,
) -> Result<TimelinePlan, ValidationError> {
    let project_start_date = step
        .project_start_date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_start_date)
        .transpose()?;

    let mut entries: Vec<(&String, Option<&str>)> = step
        .phase_durations
        .iter()
        .map(|(id, duration)| (id, duration.as_deref().map(str::trim).filter(|d| !d.is_empty())))
        .collect();
    // Known phases in delivery order, then anything else alphabetically.
    entries.sort_by_key(|(id, _)| (catalog.phases.position(id).unwrap_or(usize::MAX), (*id).clone()));

    let phases = entries
        .into_iter()
        .filter(|(id, duration)| includes_mobile || id.as_str() != MOBILE_PHASE_ID || duration.is_some())
        .map(|(id, duration)| {
            let definition = catalog.phases.get(id);
            let name = definition.map_or_else(|| id.clone(), |d| d.name.clone());
            let duration = duration
                .map(str::to_string)
                .or_else(|| definition.map(|d| d.default_duration.clone()))
                .unwrap_or_else(|| UNKNOWN_DURATION.to_string());
            Phase::new(id.clone(), name, Some(duration))
        })
        .collect();

    Ok(TimelinePlan {
        project_start_date,
        project_completion_date: non_empty(&step.project_completion_date),
        phases,
    })
}

fn parse_start_date(text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|dt| dt.date_naive()))
        .map_err(|_| {
            ValidationError::invalid_format(
                "step6.projectStartDate",
                format!("'{}' is not a date (expected YYYY-MM-DD)", text),
            )
        })
}

fn localization_profile(step: &LocalizationAnswers, catalog: &ProposalCatalog) -> LocalizationProfile {
    LocalizationProfile {
        target_regions: named(&step.target_regions, |id| {
            catalog.names.target_regions.name_or_id(id)
        }),
        europe_countries: non_empty(&step.europe_countries),
        africa_countries: non_empty(&step.africa_countries),
        multi_language_support: step.multi_language_support.unwrap_or(false),
        selected_languages: step.selected_languages.clone(),
        other_language: non_empty(&step.other_language),
        currency_localization: step.currency_localization.unwrap_or(false),
        selected_currencies: step.selected_currencies.clone(),
        other_currency: non_empty(&step.other_currency),
        timezone_support: step.timezone_support.unwrap_or(false),
    }
}

fn pricing_preferences(
    step: &PricingAnswers,
    localization: Option<&LocalizationAnswers>,
    catalog: &ProposalCatalog,
) -> PricingPreferences {
    let names = &catalog.names;
    let lookup = |value: &Option<String>, table: &NameLookup| {
        value
            .as_deref()
            .and_then(|id| table.name(id))
            .map(str::to_string)
    };

    let payment_terms = match non_empty(&step.payment_terms) {
        Some(terms) if terms.starts_with(OTHER_OPTION_PREFIX) => {
            non_empty(&step.other_payment_terms).or(Some(terms))
        }
        other => other,
    };

    let other_currency = localization.and_then(|l| non_empty(&l.other_currency));
    let proposal_currency = non_empty(&step.proposal_currency)
        .and_then(|raw| currency_code(&raw, other_currency.as_deref()));

    PricingPreferences {
        pricing_model_name: lookup(&step.pricing_model, &names.pricing_models),
        pricing_model: non_empty(&step.pricing_model),
        project_complexity_name: step
            .project_complexity
            .as_deref()
            .and_then(|id| catalog.complexity.get(id))
            .map(|level| level.name.clone()),
        project_complexity: non_empty(&step.project_complexity),
        payment_terms,
        proposal_currency,
        preferred_budget_range: non_empty(&step.preferred_budget_range),
        ongoing_maintenance: step.ongoing_maintenance.unwrap_or(false),
        support_level_name: lookup(&step.support_level, &names.support_levels),
        support_level: non_empty(&step.support_level),
        support_duration_name: lookup(&step.support_duration, &names.support_durations),
        support_duration: non_empty(&step.support_duration),
    }
}

/// Reduces a currency answer to its code.
///
/// "EUR (Euro)" becomes "EUR"; "Other" is replaced by the free-text currency
/// from the localisation step when there is one.
fn currency_code(raw: &str, other_currency: Option<&str>) -> Option<String> {
    if raw.starts_with(OTHER_OPTION_PREFIX) {
        return other_currency.map(str::to_string);
    }
    let code = raw.split_whitespace().next().unwrap_or(raw);
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        Some(raw.to_string())
    }
}

fn catalog_role(role: &RoleAnswer, catalog: &ProposalCatalog) -> RoleAllocation {
    let role_name = catalog
        .names
        .roles
        .name(&role.role_id)
        .map(str::to_string)
        .or_else(|| non_empty(&role.role_name))
        .unwrap_or_else(|| role.role_id.clone());
    RoleAllocation {
        role_id: role.role_id.clone(),
        role_name,
        quantity: role.quantity.clone(),
        fte: role.fte.clone(),
    }
}

fn custom_role(role: &RoleAnswer) -> RoleAllocation {
    RoleAllocation {
        role_id: role.role_id.clone(),
        role_name: non_empty(&role.role_name).unwrap_or_else(|| UNNAMED_CUSTOM_ROLE.to_string()),
        quantity: role.quantity.clone(),
        fte: role.fte.clone(),
    }
}

fn platform_name(platform: &str) -> String {
    match platform.to_ascii_lowercase().as_str() {
        "ios" => "iOS".to_string(),
        "android" => "Android".to_string(),
        _ => platform.to_uppercase(),
    }
}

fn named<'a>(ids: &'a [String], name_of: impl Fn(&'a str) -> &'a str) -> Vec<NamedOption> {
    ids.iter()
        .map(|id| NamedOption {
            id: id.clone(),
            name: name_of(id).to_string(),
        })
        .collect()
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
