// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar-date parsing and formatting.

use chrono::NaiveDate;

/// Wire format for dates in request bodies and query strings.
const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date string. Rejects impossible dates
/// (e.g. `2023-13-40`) as well as malformed input.
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, WIRE_DATE_FORMAT).ok()
}

/// Format a date as the human-readable string used in API responses,
/// e.g. `"Mon Jan 01 2024"`.
pub fn format_human_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_date_valid() {
        let date = parse_wire_date("2024-01-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_wire_date_rejects_impossible_date() {
        assert!(parse_wire_date("2023-13-40").is_none());
    }

    #[test]
    fn test_parse_wire_date_rejects_garbage() {
        assert!(parse_wire_date("not-a-date").is_none());
        assert!(parse_wire_date("").is_none());
        assert!(parse_wire_date("01/01/2024").is_none());
    }

    #[test]
    fn test_format_human_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(format_human_date(date), "Mon Jan 01 2024");
    }

    #[test]
    fn test_format_human_date_two_digit_day() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        assert_eq!(format_human_date(date), "Mon Dec 25 2023");
    }
}
