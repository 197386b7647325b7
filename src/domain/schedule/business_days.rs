//! Business-day calendar arithmetic.
//!
//! A business day is any day other than Saturday or Sunday; holidays are
//! not modelled.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Whether `date` falls on a weekday.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advances `date` by `count` business days.
///
/// Advancing by 0 returns `date` unchanged (even on a weekend); advancing by
/// 1 returns the next weekday after `date`. Returns `None` if the result
/// would leave the supported calendar range.
pub fn add_business_days(date: NaiveDate, count: u32) -> Option<NaiveDate> {
    if count == 0 {
        return Some(date);
    }

    let mut current = date;
    let mut remaining = count;

    // Land on a weekday first so whole weeks can be skipped in one step.
    if !is_business_day(current) {
        current = next_business_day(current)?;
        remaining -= 1;
    }

    let whole_weeks = remaining / 5;
    current = current.checked_add_days(Days::new(u64::from(whole_weeks) * 7))?;

    for _ in 0..remaining % 5 {
        current = next_business_day(current)?;
    }

    Some(current)
}

/// The first weekday strictly after `date`.
pub fn next_business_day(date: NaiveDate) -> Option<NaiveDate> {
    let mut current = date.succ_opt()?;
    while !is_business_day(current) {
        current = current.succ_opt()?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Reference implementation: one day at a time.
    fn step_by_step(start: NaiveDate, count: u32) -> NaiveDate {
        let mut current = start;
        let mut added = 0;
        while added < count {
            current = current.succ_opt().unwrap();
            if is_business_day(current) {
                added += 1;
            }
        }
        current
    }

    #[test]
    fn weekdays_are_business_days() {
        // 2024-06-03 is a Monday
        assert!(is_business_day(date(2024, 6, 3)));
        assert!(is_business_day(date(2024, 6, 7)));
        assert!(!is_business_day(date(2024, 6, 8)));
        assert!(!is_business_day(date(2024, 6, 9)));
    }

    #[test]
    fn adding_zero_returns_same_date() {
        assert_eq!(add_business_days(date(2024, 6, 3), 0), Some(date(2024, 6, 3)));
        assert_eq!(add_business_days(date(2024, 6, 8), 0), Some(date(2024, 6, 8)));
    }

    #[test]
    fn adding_one_from_friday_skips_weekend() {
        assert_eq!(add_business_days(date(2024, 6, 7), 1), Some(date(2024, 6, 10)));
    }

    #[test]
    fn nine_days_from_monday_ends_second_friday() {
        assert_eq!(add_business_days(date(2024, 6, 3), 9), Some(date(2024, 6, 14)));
    }

    #[test]
    fn weekend_start_moves_to_monday_first() {
        assert_eq!(add_business_days(date(2024, 6, 8), 1), Some(date(2024, 6, 10)));
        assert_eq!(add_business_days(date(2024, 6, 9), 5), Some(date(2024, 6, 14)));
    }

    #[test]
    fn next_business_day_skips_weekend() {
        assert_eq!(next_business_day(date(2024, 6, 7)), Some(date(2024, 6, 10)));
        assert_eq!(next_business_day(date(2024, 6, 4)), Some(date(2024, 6, 5)));
    }

    #[test]
    fn overflow_returns_none() {
        assert_eq!(add_business_days(NaiveDate::MAX, 1), None);
    }

    proptest! {
        #[test]
        fn matches_day_by_day_walk(offset in 0i64..3650, count in 0u32..400) {
            let start = date(2020, 1, 1) + chrono::Duration::days(offset);
            prop_assert_eq!(add_business_days(start, count), Some(step_by_step(start, count)));
        }

        #[test]
        fn positive_counts_land_on_business_days(offset in 0i64..3650, count in 1u32..400) {
            let start = date(2020, 1, 1) + chrono::Duration::days(offset);
            let end = add_business_days(start, count).unwrap();
            prop_assert!(is_business_day(end));
            prop_assert!(end > start);
        }
    }
}
