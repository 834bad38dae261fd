//! Date canonicalization.
//!
//! Accepted shapes: `YYYY-MM-DD`, `MM/DD/YYYY`, `DD/MM/YYYY`,
//! `MM-DD-YYYY`, `DD-MM-YYYY`. The locale's [`DateOrder`] decides how the
//! two leading components of year-last forms are read. A year found in the
//! middle position (the `MM/YYYY/DD` mis-ordering that shows up in pasted
//! data) is repaired deterministically: there is exactly one year
//! candidate, so the remaining components keep their locale order. Inputs
//! with zero or several year candidates are unrecoverable.
//!
//! Output is strictly `YYYY-MM-DD`, or `""` when the input cannot be
//! resolved. Idempotent on canonical input.

use crate::locale::DateOrder;

/// Accepted year window.
const YEAR_MIN: u32 = 1900;
const YEAR_MAX: u32 = 2100;

/// Canonicalize a user-entered date to `YYYY-MM-DD`.
///
/// Returns `""` when the input cannot be resolved; never panics.
pub fn normalize_date(input: &str, order: DateOrder) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let parts: Vec<&str> = trimmed.split(['/', '-']).collect();
    if parts.len() != 3 {
        tracing::warn!(input = trimmed, "date has wrong component count");
        return String::new();
    }
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        tracing::warn!(input = trimmed, "date has non-numeric components");
        return String::new();
    }

    // The year is the single 4-digit component; anything else is either
    // missing a year or has two candidates, and guessing is worse than
    // failing (the caller turns "" into a field error).
    let year_positions: Vec<usize> = (0..3).filter(|&i| parts[i].len() == 4).collect();
    if year_positions.len() != 1 {
        tracing::warn!(input = trimmed, "date has no unambiguous year");
        return String::new();
    }
    let year_pos = year_positions[0];

    let num = |s: &str| s.parse::<u32>().unwrap_or(0);
    let year = num(parts[year_pos]);
    let (month, day) = match year_pos {
        // Canonical year-first: always month-then-day.
        0 => (num(parts[1]), num(parts[2])),
        // Year-last: locale picks the prefix order.
        2 => match order {
            DateOrder::MonthFirst => (num(parts[0]), num(parts[1])),
            DateOrder::DayFirst => (num(parts[1]), num(parts[0])),
        },
        // Year in the middle: reorder, keeping the locale's prefix order
        // for the two remaining components.
        _ => match order {
            DateOrder::MonthFirst => (num(parts[0]), num(parts[2])),
            DateOrder::DayFirst => (num(parts[2]), num(parts[0])),
        },
    };

    if !(YEAR_MIN..=YEAR_MAX).contains(&year) || !(1..=12).contains(&month) || !(1..=31).contains(&day)
    {
        tracing::warn!(input = trimmed, year, month, day, "date out of range");
        return String::new();
    }

    format!("{year:04}-{month:02}-{day:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_input_is_idempotent() {
        assert_eq!(
            normalize_date("2020-02-13", DateOrder::MonthFirst),
            "2020-02-13"
        );
        assert_eq!(
            normalize_date("2020-02-13", DateOrder::DayFirst),
            "2020-02-13"
        );
    }

    #[test]
    fn us_reads_month_first() {
        assert_eq!(
            normalize_date("02/13/2020", DateOrder::MonthFirst),
            "2020-02-13"
        );
        assert_eq!(
            normalize_date("02-13-2020", DateOrder::MonthFirst),
            "2020-02-13"
        );
    }

    #[test]
    fn day_first_locales_read_day_first() {
        assert_eq!(
            normalize_date("13/02/2020", DateOrder::DayFirst),
            "2020-02-13"
        );
        assert_eq!(
            normalize_date("13-02-2020", DateOrder::DayFirst),
            "2020-02-13"
        );
    }

    #[test]
    fn leading_year_is_always_month_then_day() {
        assert_eq!(
            normalize_date("2020/02/13", DateOrder::DayFirst),
            "2020-02-13"
        );
    }

    #[test]
    fn year_in_middle_is_repaired() {
        assert_eq!(
            normalize_date("02/2020/13", DateOrder::MonthFirst),
            "2020-02-13"
        );
        assert_eq!(
            normalize_date("13/2020/02", DateOrder::DayFirst),
            "2020-02-13"
        );
    }

    #[test]
    fn multiple_year_candidates_are_rejected() {
        assert_eq!(normalize_date("1999/2000/01", DateOrder::MonthFirst), "");
    }

    #[test]
    fn missing_year_is_rejected() {
        assert_eq!(normalize_date("02/13/20", DateOrder::MonthFirst), "");
    }

    #[test]
    fn out_of_range_components_are_rejected() {
        assert_eq!(normalize_date("1899-02-13", DateOrder::MonthFirst), "");
        assert_eq!(normalize_date("2101-02-13", DateOrder::MonthFirst), "");
        assert_eq!(normalize_date("2020-13-01", DateOrder::MonthFirst), "");
        assert_eq!(normalize_date("2020-00-10", DateOrder::MonthFirst), "");
        assert_eq!(normalize_date("2020-02-32", DateOrder::MonthFirst), "");
        assert_eq!(normalize_date("2020-02-00", DateOrder::MonthFirst), "");
    }

    #[test]
    fn garbage_is_rejected_not_panicked() {
        for input in ["", "   ", "yesterday", "2020-02", "2020-02-13-05", "a/b/c", "2020//13"] {
            assert_eq!(normalize_date(input, DateOrder::MonthFirst), "", "{input:?}");
        }
    }

    #[test]
    fn single_digit_components_are_padded() {
        assert_eq!(
            normalize_date("2/3/2020", DateOrder::MonthFirst),
            "2020-02-03"
        );
        assert_eq!(
            normalize_date("2020-2-3", DateOrder::DayFirst),
            "2020-02-03"
        );
    }
}
