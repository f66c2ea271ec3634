// Date utility functions
// Canonical storage format for end dates and instant helpers

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// Storage/display format for calendar dates entered by the user.
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `YYYY-MM-DD` string into a real calendar date.
///
/// Rejects anything that is not exactly four, two and two digits separated by
/// dashes, as well as dates that do not exist (e.g. `2025-04-31`).
pub fn parse_storage_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(index, byte)| index == 4 || index == 7 || byte.is_ascii_digit());
    if !well_formed {
        return None;
    }

    NaiveDate::parse_from_str(value, STORAGE_DATE_FORMAT).ok()
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Resolves a stored end date into an instant.
///
/// Accepts the canonical `YYYY-MM-DD` form (midnight UTC) and full RFC 3339
/// timestamps.
pub fn parse_end_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Some(date) = parse_storage_date(value) {
        return Some(start_of_day_utc(date));
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

/// Formats an instant for storage, preferring the short date form when the
/// instant falls on midnight UTC.
pub fn format_end_instant(instant: DateTime<Utc>) -> String {
    if instant.time() == NaiveTime::MIN {
        instant.format(STORAGE_DATE_FORMAT).to_string()
    } else {
        instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Today's date in UTC, used as the default minimum for new end dates.
pub fn today_utc(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}
