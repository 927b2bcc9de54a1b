//! Date label parsing.
//!
//! Index pages label each session with text like
//! `"Monday 01/02/2024 13:45:00"`: a weekday name, then `DD/MM/YYYY` and
//! `HH:MM:SS`. Anything else is unparsable, which only affects where the
//! session sorts, never whether the archive gets built.

use chrono::{NaiveDateTime, Weekday};

/// Layout of a date label after the leading weekday name.
pub const DATE_LABEL_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Parses a session date label.
///
/// The weekday must be a recognisable name (full or abbreviated, any case)
/// but is not checked against the calendar date.
#[must_use]
pub fn parse_date_label(label: &str) -> Option<NaiveDateTime> {
    let (weekday, rest) = label.trim().split_once(char::is_whitespace)?;
    weekday.parse::<Weekday>().ok()?;
    NaiveDateTime::parse_from_str(rest.trim_start(), DATE_LABEL_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_label() {
        let dt = parse_date_label("Monday 01/01/2024 10:00:00").unwrap();
        assert_eq!(dt.to_string(), "2024-01-01 10:00:00");
    }

    #[test]
    fn reads_day_before_month() {
        let dt = parse_date_label("Thursday 01/02/2024 13:45:00").unwrap();
        assert_eq!(dt.to_string(), "2024-02-01 13:45:00");
    }

    #[test]
    fn tolerates_weekday_that_does_not_match_date() {
        // 1 February 2024 was a Thursday.
        let dt = parse_date_label("Monday 01/02/2024 13:45:00").unwrap();
        assert_eq!(dt.to_string(), "2024-02-01 13:45:00");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert!(parse_date_label("  Friday 05/01/2024 00:00:01\n").is_some());
    }

    #[test]
    fn rejects_unknown_weekday() {
        assert!(parse_date_label("Someday 01/01/2024 10:00:00").is_none());
    }

    #[test]
    fn rejects_other_layouts() {
        assert!(parse_date_label("2024-01-01T10:00:00").is_none());
        assert!(parse_date_label("Monday 2024/01/01 10:00:00").is_none());
        assert!(parse_date_label("Monday 01/01/2024").is_none());
        assert!(parse_date_label("Monday 01/01/2024 10:00:00 extra").is_none());
        assert!(parse_date_label("").is_none());
        assert!(parse_date_label("TBD").is_none());
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(parse_date_label("Friday 31/02/2024 10:00:00").is_none());
        assert!(parse_date_label("Friday 01/13/2024 10:00:00").is_none());
    }

    #[test]
    fn preserves_chronological_order() {
        let labels = [
            "Sunday 31/12/2023 23:59:59",
            "Monday 01/01/2024 00:00:00",
            "Monday 01/01/2024 00:00:01",
            "Tuesday 02/01/2024 09:00:00",
        ];
        let parsed: Vec<NaiveDateTime> = labels
            .iter()
            .map(|l| parse_date_label(l).unwrap())
            .collect();
        assert!(parsed.windows(2).all(|w| w[0] < w[1]));
    }
}
