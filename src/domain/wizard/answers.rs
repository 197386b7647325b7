//! Raw questionnaire answers, one optional section per step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::numeric::NumericInput;

/// Platforms the application targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationType {
    Web,
    Mobile,
    Both,
}

impl ApplicationType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ApplicationType::Web => "Web Application",
            ApplicationType::Mobile => "Mobile Application",
            ApplicationType::Both => "Both Web & Mobile",
        }
    }

    /// Whether mobile development is part of the delivery.
    pub fn includes_mobile(&self) -> bool {
        matches!(self, ApplicationType::Mobile | ApplicationType::Both)
    }
}

/// Everything the questionnaire submits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardAnswers {
    #[serde(default)]
    pub step1: Option<ApplicationAnswers>,
    #[serde(default)]
    pub step2: Option<IndustryAnswers>,
    #[serde(default)]
    pub step3: Option<ModuleAnswers>,
    #[serde(default)]
    pub step4: Option<IntegrationAnswers>,
    #[serde(default)]
    pub step5: Option<DeploymentAnswers>,
    #[serde(default)]
    pub step6: Option<TimelineAnswers>,
    #[serde(default)]
    pub step7: Option<LocalizationAnswers>,
    #[serde(default)]
    pub step8: Option<ComplianceAnswers>,
    #[serde(default)]
    pub step9: Option<PricingAnswers>,
    #[serde(default)]
    pub step10: Option<ResourcingAnswers>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAnswers {
    #[serde(default)]
    pub application_type: Option<ApplicationType>,
    #[serde(default)]
    pub mobile_platforms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryAnswers {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub other_industry: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleAnswers {
    /// Main module id → selected sub-module ids.
    #[serde(default)]
    pub selected_modules: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub other_modules_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationAnswers {
    #[serde(default)]
    pub selected_integrations: Vec<String>,
    #[serde(default)]
    pub other_integrations_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentAnswers {
    #[serde(default)]
    pub deployment_environment: Option<String>,
    #[serde(default)]
    pub preferred_region: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineAnswers {
    /// ISO date (`YYYY-MM-DD`) or RFC 3339 timestamp.
    #[serde(default)]
    pub project_start_date: Option<String>,
    #[serde(default)]
    pub project_completion_date: Option<String>,
    /// Phase id → free-form duration text.
    #[serde(default)]
    pub phase_durations: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizationAnswers {
    #[serde(default)]
    pub target_regions: Vec<String>,
    #[serde(default)]
    pub europe_countries: Option<String>,
    #[serde(default)]
    pub africa_countries: Option<String>,
    #[serde(default)]
    pub multi_language_support: Option<bool>,
    #[serde(default)]
    pub selected_languages: Vec<String>,
    #[serde(default)]
    pub other_language: Option<String>,
    #[serde(default)]
    pub currency_localization: Option<bool>,
    #[serde(default)]
    pub selected_currencies: Vec<String>,
    #[serde(default)]
    pub other_currency: Option<String>,
    #[serde(default)]
    pub timezone_support: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceAnswers {
    #[serde(default)]
    pub selected_compliance_options: Vec<String>,
    #[serde(default)]
    pub other_compliance_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingAnswers {
    #[serde(default)]
    pub pricing_model: Option<String>,
    #[serde(default)]
    pub project_complexity: Option<String>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    #[serde(default)]
    pub other_payment_terms: Option<String>,
    /// Either a bare code ("EUR") or a labelled option ("EUR (Euro)").
    #[serde(default)]
    pub proposal_currency: Option<String>,
    #[serde(default)]
    pub preferred_budget_range: Option<String>,
    #[serde(default)]
    pub ongoing_maintenance: Option<bool>,
    #[serde(default)]
    pub support_level: Option<String>,
    #[serde(default)]
    pub support_duration: Option<String>,
}

/// One role line as entered on the resourcing step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAnswer {
    pub role_id: String,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub quantity: NumericInput,
    /// Percentage of one full-time equivalent, 0-100.
    #[serde(default)]
    pub fte: NumericInput,
    #[serde(default)]
    pub is_selected: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcingAnswers {
    #[serde(default)]
    pub roles: Vec<RoleAnswer>,
    #[serde(default)]
    pub custom_roles: Vec<RoleAnswer>,
    #[serde(default)]
    pub team_location_preference: Option<String>,
}
