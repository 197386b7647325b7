//! Free-form duration text to business days.
//!
//! Scheduling and costing both read phase lengths through this module, so a
//! phase always has the same day count on the timeline and in the estimate.

use once_cell::sync::Lazy;
use regex::Regex;

/// Business days in one week.
pub const DAYS_PER_WEEK: u32 = 5;

static WEEK_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*-\s*(\d+)\s*weeks?").expect("week range pattern is valid")
});

static WEEKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*weeks?").expect("weeks pattern is valid"));

static DAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*days?").expect("days pattern is valid"));

/// Parses duration text into business days.
///
/// Rules, first match wins:
///
/// 1. `"<min>-<max> weeks"` → `ceil((min + max) / 2) * 5`
/// 2. `"<n> week(s)"` → `n * 5`
/// 3. `"<n> day(s)"` → `n`, already business days
///
/// Returns `None` for empty text, text matching no rule, or a count too
/// large to represent.
pub fn try_parse_business_days(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = WEEK_RANGE.captures(text) {
        let min: u64 = caps[1].parse::<u32>().ok()?.into();
        let max: u64 = caps[2].parse::<u32>().ok()?.into();
        let average_weeks = (min + max + 1) / 2;
        return u32::try_from(average_weeks).ok()?.checked_mul(DAYS_PER_WEEK);
    }

    if let Some(caps) = WEEKS.captures(text) {
        let weeks: u32 = caps[1].parse().ok()?;
        return weeks.checked_mul(DAYS_PER_WEEK);
    }

    if let Some(caps) = DAYS.captures(text) {
        return caps[1].parse().ok();
    }

    None
}

/// Parses duration text into business days, treating anything unreadable
/// as zero.
pub fn parse_business_days(text: &str) -> u32 {
    match try_parse_business_days(text) {
        Some(days) => days,
        None => {
            tracing::warn!(duration = %text, "unparseable duration, defaulting to 0 business days");
            0
        }
    }
}
