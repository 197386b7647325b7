//! Numeric answers that may arrive as JSON numbers or as text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantity or FTE percentage exactly as the questionnaire sent it.
///
/// Form widgets submit either numbers or numeric strings; the original
/// value is kept for display and only interpreted when costing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// The value as a finite number, if it is one.
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// The value if it is finite and strictly positive.
    pub fn positive(&self) -> Option<f64> {
        self.value().filter(|v| *v > 0.0)
    }
}

impl Default for NumericInput {
    fn default() -> Self {
        NumericInput::Text(String::new())
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericInput::Number(n) => write!(f, "{}", n),
            NumericInput::Text(text) => write!(f, "{}", text.trim()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_numbers_and_strings() {
        let number: NumericInput = serde_json::from_str("2").unwrap();
        let text: NumericInput = serde_json::from_str("\"50\"").unwrap();
        assert_eq!(number.value(), Some(2.0));
        assert_eq!(text.value(), Some(50.0));
    }

    #[test]
    fn non_numeric_text_has_no_value() {
        assert_eq!(NumericInput::from("two").value(), None);
        assert_eq!(NumericInput::from("").value(), None);
        assert_eq!(NumericInput::default().positive(), None);
    }

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert_eq!(NumericInput::from(0.0).positive(), None);
        assert_eq!(NumericInput::from(-1.0).positive(), None);
        assert_eq!(NumericInput::from(" 75 ").positive(), Some(75.0));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert_eq!(NumericInput::from("inf").value(), None);
        assert_eq!(NumericInput::from("NaN").value(), None);
    }

    #[test]
    fn displays_original_form() {
        assert_eq!(NumericInput::from(1.0).to_string(), "1");
        assert_eq!(NumericInput::from(0.5).to_string(), "0.5");
        assert_eq!(NumericInput::from(" 2 ").to_string(), "2");
    }
}
