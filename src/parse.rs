use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::error::Error;

// Candidate formats are tried in order; the first hit wins. Date-only
// inputs resolve to midnight.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y:%m:%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y:%m:%d", "%Y/%m/%d"];

/// Parses a general date/time string: `now`, `@<unix timestamp>`, or any
/// of the supported calendar formats.
pub(crate) fn parse_date_time(input: &str) -> Result<NaiveDateTime, Error> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("now") {
        return Ok(Local::now().naive_local());
    }
    if let Some(timestamp) = trimmed.strip_prefix('@') {
        let seconds: i64 = timestamp
            .parse()
            .map_err(|_| Error::Parse(input.to_string()))?;
        return DateTime::from_timestamp(seconds, 0)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| Error::Parse(input.to_string()));
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(date_time);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.and_hms_opt(0, 0, 0).expect("midnight is valid"));
        }
    }
    Err(Error::Parse(input.to_string()))
}
