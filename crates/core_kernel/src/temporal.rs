//! Claim date handling
//!
//! Claim records carry dates as strings in whatever format the intake form
//! or batch file used. Parsing is lenient and never fails loudly; an
//! unreadable date is simply absent.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::record::FieldValue;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses a claim date from a field value
///
/// Accepts plain dates (`2023-02-10`, `02/10/2023`, `2023/02/10`), naive
/// datetimes (`2023-02-10T08:30:00`, `2023-02-10 08:30:00`) and RFC 3339
/// timestamps; the time component is discarded.
pub fn parse_claim_date(value: &FieldValue) -> Option<NaiveDate> {
    if value.is_missing() {
        return None;
    }
    let text = value.to_text()?;
    let text = text.trim();

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    {
        return Some(date);
    }

    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(datetime.date());
    }

    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|datetime| datetime.date_naive())
}

/// Signed number of days from `start` to `end`
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}
