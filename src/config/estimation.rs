//! Cost estimation configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::catalog::{RateCard, DEFAULT_HOURLY_RATE, FALLBACK_CURRENCY, HOURS_PER_DAY};

/// Overrides applied on top of the standard rate card
#[derive(Debug, Clone, Deserialize)]
pub struct EstimationConfig {
    /// Working hours in one business day
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,

    /// Hourly rate for roles without an explicit rate
    #[serde(default = "default_hourly_rate")]
    pub default_hourly_rate: f64,

    /// Currency reported when the questionnaire names none
    #[serde(default = "default_currency")]
    pub fallback_currency: String,
}

impl EstimationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.hours_per_day.is_finite() && self.hours_per_day > 0.0) {
            return Err(ValidationError::InvalidHoursPerDay);
        }
        if !self.default_hourly_rate.is_finite() || self.default_hourly_rate < 0.0 {
            return Err(ValidationError::NegativeHourlyRate);
        }
        let currency = self.fallback_currency.as_str();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCurrency(currency.to_string()));
        }
        Ok(())
    }

    /// Standard catalog rates with these overrides applied.
    pub fn rate_card(&self) -> RateCard {
        RateCard::standard()
            .with_hours_per_day(self.hours_per_day)
            .with_default_hourly_rate(self.default_hourly_rate)
            .with_fallback_currency(self.fallback_currency.to_ascii_uppercase())
    }
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            hours_per_day: default_hours_per_day(),
            default_hourly_rate: default_hourly_rate(),
            fallback_currency: default_currency(),
        }
    }
}

fn default_hours_per_day() -> f64 {
    HOURS_PER_DAY
}

fn default_hourly_rate() -> f64 {
    DEFAULT_HOURLY_RATE
}

fn default_currency() -> String {
    FALLBACK_CURRENCY.to_string()
}
