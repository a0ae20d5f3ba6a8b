//! Routine day-of-week sets.
//!
//! Stored and transmitted as a comma-separated list of Sunday-based day
//! indices, e.g. `"1,2,3,4,5"` for weekdays. 0 is Sunday, 6 is Saturday.

use crate::error::{CoreError, CoreResult};

/// ## Summary
/// Parses a day-of-week set, rejecting anything outside `0..=6` and
/// dropping duplicates. Order of the input is preserved.
///
/// ## Errors
/// Returns a validation error for an empty set or a non-digit entry.
pub fn parse_days_of_week(days: &str) -> CoreResult<Vec<u8>> {
    let mut seen = [false; 7];
    let mut out = Vec::new();
    for part in days.split(',') {
        let trimmed = part.trim();
        let day: u8 = trimmed.parse().map_err(|_| {
            CoreError::ValidationError(format!("invalid day of week entry: {trimmed:?}"))
        })?;
        if day > 6 {
            return Err(CoreError::ValidationError(format!(
                "day of week out of range: {day}"
            )));
        }
        if !seen[usize::from(day)] {
            seen[usize::from(day)] = true;
            out.push(day);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_full_week() {
        assert_eq!(
            parse_days_of_week("0,1,2,3,4,5,6").unwrap(),
            vec![0, 1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn duplicates_collapse() {
        assert_eq!(parse_days_of_week("1,1,2").unwrap(), vec![1, 2]);
    }

    #[test]
    fn whitespace_around_entries_is_tolerated() {
        assert_eq!(parse_days_of_week(" 1, 2 ,3").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn out_of_range_and_garbage_are_rejected() {
        assert!(parse_days_of_week("7").is_err());
        assert!(parse_days_of_week("mon").is_err());
        assert!(parse_days_of_week("").is_err());
    }
}
