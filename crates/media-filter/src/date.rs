//! Date encoding for machine and display text.
//!
//! The machine form depends on the dialect and the column:
//!
//! - Android stores dates as integers since the Unix epoch. Most columns are
//!   in seconds; `datetaken` is in milliseconds.
//! - Darwin compares against `NSDate` values, written as
//!   `CAST(<seconds since 2001-01-01T00:00:00Z>, "NSDate")`.
//!
//! The display form is an ISO-8601 UTC string and is never fed to a query
//! engine.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::dialect::{Dialect, MILLISECOND_DATE_COLUMN};

/// Seconds between the Unix epoch and the Core Data reference date.
const REFERENCE_DATE_OFFSET_SECS: i64 = 978_307_200;

/// Encodes `value` the way `dialect` expects for `column`.
pub fn encode(dialect: Dialect, column: &str, value: &DateTime<Utc>) -> String {
    match dialect {
        Dialect::Android if column == MILLISECOND_DATE_COLUMN => {
            value.timestamp_millis().to_string()
        }
        Dialect::Android => value.timestamp().to_string(),
        Dialect::Darwin => {
            let millis = value.timestamp_millis() - REFERENCE_DATE_OFFSET_SECS * 1000;
            format!("CAST({}, \"NSDate\")", millis as f64 / 1000.0)
        }
    }
}

/// Human-readable form of `value`, e.g. `2024-03-01T12:00:00.000Z`.
pub fn display(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
