//! Hourly rates, working hours and complexity multipliers used for costing.

use std::collections::BTreeMap;

/// Prefix of identifiers generated for user-defined roles.
pub const CUSTOM_ROLE_PREFIX: &str = "custom_";

/// Hourly rate for roles missing from the rate table.
pub const DEFAULT_HOURLY_RATE: f64 = 75.0;

/// Working hours in one business day.
pub const HOURS_PER_DAY: f64 = 8.0;

/// Currency reported when the questionnaire names none.
pub const FALLBACK_CURRENCY: &str = "USD";

/// Rate table for catalog roles plus the defaults applied to everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct RateCard {
    rates: BTreeMap<String, f64>,
    default_hourly_rate: f64,
    hours_per_day: f64,
    fallback_currency: String,
}

impl RateCard {
    pub fn new(rates: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            rates: rates.into_iter().collect(),
            default_hourly_rate: DEFAULT_HOURLY_RATE,
            hours_per_day: HOURS_PER_DAY,
            fallback_currency: FALLBACK_CURRENCY.to_string(),
        }
    }

    /// Rates for the standard role catalog.
    pub fn standard() -> Self {
        Self::new(
            [
                ("project_manager", 100.0),
                ("business_analyst", 90.0),
                ("ui_ux_designer", 85.0),
                ("backend_developer", 120.0),
                ("frontend_developer", 110.0),
                ("mobile_app_developer_ios", 125.0),
                ("mobile_app_developer_android", 125.0),
                ("qa_engineer", 80.0),
                ("devops_engineer", 115.0),
                ("solution_architect", 150.0),
                ("technical_lead", 140.0),
                ("data_scientist", 130.0),
            ]
            .into_iter()
            .map(|(id, rate)| (id.to_string(), rate)),
        )
    }

    pub fn with_default_hourly_rate(mut self, rate: f64) -> Self {
        self.default_hourly_rate = rate;
        self
    }

    pub fn with_hours_per_day(mut self, hours: f64) -> Self {
        self.hours_per_day = hours;
        self
    }

    pub fn with_fallback_currency(mut self, currency: impl Into<String>) -> Self {
        self.fallback_currency = currency.into();
        self
    }

    /// Explicit rate for a role, if the table has one.
    pub fn explicit_rate(&self, role_id: &str) -> Option<f64> {
        self.rates.get(role_id).copied()
    }

    /// Rate for a role, falling back to the default hourly rate.
    pub fn hourly_rate(&self, role_id: &str) -> f64 {
        self.explicit_rate(role_id).unwrap_or(self.default_hourly_rate)
    }

    pub fn default_hourly_rate(&self) -> f64 {
        self.default_hourly_rate
    }

    pub fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }

    pub fn fallback_currency(&self) -> &str {
        &self.fallback_currency
    }

    /// Whether an id follows the generated custom-role naming convention.
    pub fn is_custom_role(role_id: &str) -> bool {
        role_id.starts_with(CUSTOM_ROLE_PREFIX)
    }
}

impl Default for RateCard {
    fn default() -> Self {
        Self::standard()
    }
}

/// One selectable project complexity.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityLevel {
    pub id: String,
    pub name: String,
    pub multiplier: f64,
}

/// Multipliers applied to the summed phase costs.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityTable {
    levels: Vec<ComplexityLevel>,
}

impl ComplexityTable {
    /// Multiplier used when nothing is selected.
    pub const DEFAULT_MULTIPLIER: f64 = 1.0;

    pub fn new(levels: Vec<ComplexityLevel>) -> Self {
        Self { levels }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            ComplexityLevel {
                id: "standard".to_string(),
                name: "Standard".to_string(),
                multiplier: 1.0,
            },
            ComplexityLevel {
                id: "medium".to_string(),
                name: "Medium".to_string(),
                multiplier: 1.2,
            },
            ComplexityLevel {
                id: "high".to_string(),
                name: "High".to_string(),
                multiplier: 1.5,
            },
        ])
    }

    pub fn get(&self, id: &str) -> Option<&ComplexityLevel> {
        self.levels.iter().find(|level| level.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComplexityLevel> {
        self.levels.iter()
    }
}

impl Default for ComplexityTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_roles_have_explicit_rates() {
        let card = RateCard::standard();
        assert_eq!(card.hourly_rate("project_manager"), 100.0);
        assert_eq!(card.hourly_rate("solution_architect"), 150.0);
        assert_eq!(card.explicit_rate("mobile_app_developer_ios"), Some(125.0));
    }

    #[test]
    fn unknown_roles_fall_back_to_default_rate() {
        let card = RateCard::standard();
        assert_eq!(card.explicit_rate("custom_abc"), None);
        assert_eq!(card.hourly_rate("custom_abc"), DEFAULT_HOURLY_RATE);
    }

    #[test]
    fn builder_overrides_defaults() {
        let card = RateCard::standard()
            .with_default_hourly_rate(60.0)
            .with_hours_per_day(7.5)
            .with_fallback_currency("EUR");
        assert_eq!(card.hourly_rate("custom_x"), 60.0);
        assert_eq!(card.hours_per_day(), 7.5);
        assert_eq!(card.fallback_currency(), "EUR");
    }

    #[test]
    fn custom_roles_are_detected_by_prefix() {
        assert!(RateCard::is_custom_role("custom_1712345"));
        assert!(!RateCard::is_custom_role("project_manager"));
        assert!(!RateCard::is_custom_role("my_custom_role"));
    }

    #[test]
    fn complexity_table_resolves_multipliers() {
        let table = ComplexityTable::standard();
        assert_eq!(table.get("medium").map(|l| l.multiplier), Some(1.2));
        assert_eq!(table.get("high").map(|l| l.name.as_str()), Some("High"));
        assert!(table.get("extreme").is_none());
    }
}
