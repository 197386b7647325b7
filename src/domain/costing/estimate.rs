//! Cost estimate value objects.

use serde::Serialize;

use crate::domain::wizard::NumericInput;

/// Effort and cost of one role within one phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLine {
    pub role_id: String,
    pub role_name: String,
    pub quantity: NumericInput,
    pub fte: NumericInput,
    pub hourly_rate: f64,
    pub effort_hours: f64,
    pub cost: f64,
}

/// Totals for one scheduled phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseCost {
    pub phase_id: String,
    pub phase_name: String,
    pub business_days: u32,
    pub effort_hours: f64,
    pub cost: f64,
    /// Lines with positive effort only.
    pub roles_breakdown: Vec<CostLine>,
}

/// Cost of the whole proposal.
///
/// Monetary and hour figures are rounded to two decimals; the arithmetic
/// behind them is carried out at full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub cost_by_phase: Vec<PhaseCost>,
    pub sub_total: f64,
    pub complexity_adjustment_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity_adjustment_name: Option<String>,
    pub total: f64,
    pub currency: String,
    pub notes: Vec<String>,
}

impl CostEstimate {
    /// Total effort across all phases.
    pub fn total_effort_hours(&self) -> f64 {
        round2(self.cost_by_phase.iter().map(|p| p.effort_hours).sum())
    }
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

/// Formats an amount with two decimals and thousands separators.
pub fn format_amount(value: f64) -> String {
    let rounded = round2(value);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}
