//! Date range handling for activity queries.

use crate::GarminError;
use chrono::NaiveDate;
use std::fmt;

const WIRE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar-date range.
///
/// Text given to [`DateRange::parse`] is validated as a date but sent and
/// used in file names exactly as written. `start > end` is accepted as-is;
/// the service decides what that means.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
    start_text: String,
    end_text: String,
}

impl DateRange {
    /// Range whose wire form is the zero-padded `YYYY-MM-DD`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            start_text: start.format(WIRE_FORMAT).to_string(),
            end_text: end.format(WIRE_FORMAT).to_string(),
        }
    }

    /// Parse both ends from `YYYY-MM-DD` text, keeping the text.
    pub fn parse(start: &str, end: &str) -> Result<Self, GarminError> {
        Ok(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
            start_text: start.trim().to_string(),
            end_text: end.trim().to_string(),
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Query value for `startDate`.
    pub fn start_param(&self) -> &str {
        &self.start_text
    }

    pub fn end_param(&self) -> &str {
        &self.end_text
    }

    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }

    /// `<start>_to_<end>`, the stem of exported files.
    pub fn file_stem(&self) -> String {
        format!("{}_to_{}", self.start_param(), self.end_param())
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start_param(), self.end_param())
    }
}

/// Check that `s` is a `YYYY-MM-DD` date and hand back the text unchanged.
pub fn validate_date(s: &str) -> Result<String, GarminError> {
    parse_date(s)?;
    Ok(s.trim().to_string())
}

pub fn parse_date(s: &str) -> Result<NaiveDate, GarminError> {
    NaiveDate::parse_from_str(s.trim(), WIRE_FORMAT)
        .map_err(|e| GarminError::InvalidInput(format!("invalid date {s:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format_round_trip() {
        let range = DateRange::parse("2018-01-01", "2018-12-31").expect("range");
        assert_eq!(range.start_param(), "2018-01-01");
        assert_eq!(range.end_param(), "2018-12-31");
        assert_eq!(range.file_stem(), "2018-01-01_to_2018-12-31");
        assert!(!range.is_reversed());
    }

    #[test]
    fn short_day_is_sent_as_written() {
        let range = DateRange::parse("2018-01-1", "2018-02-3").expect("range");
        assert_eq!(range.start(), NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        assert_eq!(range.start_param(), "2018-01-1");
        assert_eq!(range.end_param(), "2018-02-3");
        assert_eq!(range.file_stem(), "2018-01-1_to_2018-02-3");
    }

    #[test]
    fn built_from_dates_is_zero_padded() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2018, 3, 4).unwrap(),
            NaiveDate::from_ymd_opt(2018, 3, 31).unwrap(),
        );
        assert_eq!(range.file_stem(), "2018-03-04_to_2018-03-31");
    }

    #[test]
    fn reversed_range_is_kept() {
        let range = DateRange::parse("2020-05-01", "2020-04-01").expect("range");
        assert!(range.is_reversed());
        assert_eq!(range.file_stem(), "2020-05-01_to_2020-04-01");
    }

    #[test]
    fn validate_date_keeps_text() {
        assert_eq!(validate_date(" 2018-01-1").unwrap(), "2018-01-1");
        assert!(validate_date("2018-02-30").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(DateRange::parse("yesterday", "2020-01-01").is_err());
        assert!(DateRange::parse("2020-01-01", "2020-13-01").is_err());
    }
}
