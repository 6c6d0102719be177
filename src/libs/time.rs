//! Conversions between `chrono` timestamps and the integer seconds stored in SQLite.

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::types::Type;

pub fn now() -> DateTime<Utc> {
    // Sub-second precision is not stored, drop it up front so records compare equal after a round trip.
    from_epoch(Utc::now().timestamp()).unwrap_or_else(Utc::now)
}

pub fn to_epoch(value: &DateTime<Utc>) -> i64 {
    value.timestamp()
}

pub fn from_epoch(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

/// Reads an epoch-seconds column into a timestamp inside a row mapper.
pub fn column(idx: usize, seconds: i64) -> rusqlite::Result<DateTime<Utc>> {
    from_epoch(seconds).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp {seconds} is out of range").into(),
        )
    })
}

pub fn optional_column(idx: usize, seconds: Option<i64>) -> rusqlite::Result<Option<DateTime<Utc>>> {
    seconds.map(|s| column(idx, s)).transpose()
}
