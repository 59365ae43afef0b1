//! Date parsing for document fields and quick events.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Accepted date shapes, for help messages
pub(crate) const DATE_HELP: &str =
    "use `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` or `YYYY-MM-DD HH:MM[:SS]`";

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum DateError {
    #[error("`{0}` is not a recognized date")]
    Unrecognized(String),
}

/// Parses a date or date-time. Plain dates resolve to midnight.
pub(crate) fn parse_datetime(text: &str) -> Result<NaiveDateTime, DateError> {
    let text = text.trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .ok_or_else(|| DateError::Unrecognized(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_plain_date_is_midnight() {
        assert_eq!(parse_datetime("2024-01-15"), Ok(at(2024, 1, 15, 0, 0, 0)));
    }

    #[test]
    fn test_datetime_variants() {
        assert_eq!(
            parse_datetime("2024-01-15T09:30"),
            Ok(at(2024, 1, 15, 9, 30, 0))
        );
        assert_eq!(
            parse_datetime("2024-01-15T09:30:15"),
            Ok(at(2024, 1, 15, 9, 30, 15))
        );
        assert_eq!(
            parse_datetime(" 2024-01-15 18:05 "),
            Ok(at(2024, 1, 15, 18, 5, 0))
        );
    }

    #[test]
    fn test_rejects_invalid_dates() {
        assert!(parse_datetime("2024-02-30").is_err());
        assert!(parse_datetime("January 5th").is_err());
        assert!(parse_datetime("").is_err());
    }
}
