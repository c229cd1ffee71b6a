//! Date normalization between form dates and backend instants

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use tracing::warn;

const DATE: &str = "%Y-%m-%d";
const DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_TIME_MINUTES: &str = "%Y-%m-%dT%H:%M";

/// Normalize an outbound date to a full ISO-8601 instant
///
/// - `2024-03-01` is read as local midnight and written in UTC with
///   millisecond precision (`2024-03-01T03:00:00.000Z` at UTC-3).
/// - `2024-03-01T10:00:00` gets a `Z` appended.
/// - `2024-03-01T10:00:00Z` and offset forms are returned unchanged.
///
/// Anything else is returned unchanged.
pub fn to_backend_instant(value: &str) -> String {
    let value = value.trim();

    if DateTime::parse_from_rfc3339(value).is_ok() {
        return value.to_string();
    }

    if NaiveDateTime::parse_from_str(value, DATE_TIME).is_ok() {
        return format!("{}Z", value);
    }

    if NaiveDateTime::parse_from_str(value, DATE_TIME_MINUTES).is_ok() {
        return format!("{}:00Z", value);
    }

    match NaiveDate::parse_from_str(value, DATE) {
        Ok(date) => local_midnight(date).to_rfc3339_opts(SecondsFormat::Millis, true),
        Err(_) => {
            warn!("Unparseable outbound date '{}', sending as-is", value);
            value.to_string()
        }
    }
}

/// Truncate an inbound date or instant to `YYYY-MM-DD`
///
/// Instants carrying a zone are shown as the local calendar date, so a date
/// sent through [`to_backend_instant`] reads back as the same date. Values
/// that do not parse are returned unchanged.
pub fn to_display_date(value: &str) -> String {
    let trimmed = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return instant.with_timezone(&Local).format(DATE).to_string();
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, DATE_TIME) {
        return naive.date().format(DATE).to_string();
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE) {
        return date.format(DATE).to_string();
    }

    warn!("Unparseable inbound date '{}', keeping original", value);
    value.to_string()
}

/// Instant of local midnight on `date`
///
/// When midnight does not exist locally (DST gap) the date is read as UTC.
pub fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => {
            warn!("Local midnight does not exist on {}, using UTC midnight", date);
            Utc.from_utc_datetime(&naive)
        }
    }
}
