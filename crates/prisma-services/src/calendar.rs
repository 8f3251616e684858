//! December week counting
//!
//! A reservation is split into consecutive seven-day weeks starting on its
//! first day. A week is billed at the December rate only when its first and
//! last day both fall in December; weeks straddling November/December or
//! December/January are ordinary weeks.

use chrono::{Datelike, Days, NaiveDate};
use prisma_core::models::DecemberSplit;

const DECEMBER: u32 = 12;

#[inline]
fn is_december(date: NaiveDate) -> bool {
    date.month() == DECEMBER
}

/// Count the weeks of a reservation that lie entirely in December
///
/// Returns 0 when the start date is missing or the duration is not positive.
pub fn count_december_weeks(fecha_inicio: Option<NaiveDate>, weeks: i64) -> u32 {
    let Some(start) = fecha_inicio else {
        return 0;
    };

    let mut count = 0;
    for k in 0..weeks.max(0) as u64 {
        let Some(week_start) = start.checked_add_days(Days::new(k * 7)) else {
            break;
        };
        let Some(week_end) = week_start.checked_add_days(Days::new(6)) else {
            break;
        };
        if is_december(week_start) && is_december(week_end) {
            count += 1;
        }
    }
    count
}

/// Split a reservation into December and ordinary weeks
///
/// `december_weeks + regular_weeks` equals the duration (0 for non-positive durations).
pub fn december_split(fecha_inicio: Option<NaiveDate>, weeks: i64) -> DecemberSplit {
    let december_weeks = count_december_weeks(fecha_inicio, weeks);
    let total = u32::try_from(weeks.max(0)).unwrap_or(u32::MAX);
    DecemberSplit {
        december_weeks,
        regular_weeks: total.saturating_sub(december_weeks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_missing_inputs_count_zero() {
        assert_eq!(count_december_weeks(None, 10), 0);
        assert_eq!(count_december_weeks(date(2025, 12, 1), 0), 0);
        assert_eq!(count_december_weeks(date(2025, 12, 1), -3), 0);
    }

    #[test]
    fn test_weeks_fully_inside_december() {
        // Dec 1-7, 8-14, 15-21, 22-28 count; Dec 29 - Jan 4 does not
        assert_eq!(count_december_weeks(date(2025, 12, 1), 30), 4);
        assert_eq!(count_december_weeks(date(2025, 12, 15), 30), 2);
        assert_eq!(count_december_weeks(date(2025, 12, 25), 1), 1);
        assert_eq!(count_december_weeks(date(2025, 12, 26), 1), 0);
    }

    #[test]
    fn test_straddling_weeks_do_not_count() {
        // Nov 28 - Dec 4 straddles, Dec 5-11 counts
        assert_eq!(count_december_weeks(date(2025, 11, 28), 1), 0);
        assert_eq!(count_december_weeks(date(2025, 11, 28), 2), 1);
    }

    #[test]
    fn test_no_december_overlap() {
        assert_eq!(count_december_weeks(date(2025, 3, 1), 10), 0);
    }

    #[test]
    fn test_multiple_years() {
        // The 53rd week starts Nov 30 2026 and straddles; the next three are December weeks
        assert_eq!(count_december_weeks(date(2025, 12, 1), 52), 4);
        assert_eq!(count_december_weeks(date(2025, 12, 1), 53), 4);
        assert_eq!(count_december_weeks(date(2025, 12, 1), 56), 7);
    }

    #[test]
    fn test_december_split() {
        let split = december_split(date(2025, 12, 1), 30);
        assert_eq!(split.december_weeks, 4);
        assert_eq!(split.regular_weeks, 26);

        let split = december_split(None, 5);
        assert_eq!(split, DecemberSplit { december_weeks: 0, regular_weeks: 5 });

        let split = december_split(date(2025, 12, 1), -2);
        assert_eq!(split.total(), 0);
    }

    proptest! {
        #[test]
        fn prop_split_sums_to_duration(
            offset in 0i64..3650,
            weeks in 0i64..=60,
        ) {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.checked_add_days(Days::new(offset as u64)));
            let split = december_split(start, weeks);
            prop_assert_eq!(i64::from(split.total()), weeks);
            prop_assert!(i64::from(split.december_weeks) <= weeks);
        }
    }
}
