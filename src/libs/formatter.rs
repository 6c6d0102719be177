//! Human-readable rendering of durations, timestamps and flags.
//!
//! The stores deal in `DateTime<Utc>` and whole seconds; everything here turns
//! those into the strings shown in tables, and parses the local date/time
//! strings accepted on the command line.
//!
//! ## Formats
//!
//! - Durations: `HH:MM:SS`, hours not capped at 24, negative values shown as zero
//! - Timestamps: local time, `YYYY-MM-DD HH:MM`
//! - Dates on input: `YYYY-MM-DD` (midnight local) or `YYYY-MM-DD HH:MM`
//!
//! ```rust
//! use tasktally::libs::formatter::format_seconds;
//!
//! assert_eq!(format_seconds(4700), "01:18:20");
//! ```

use anyhow::{bail, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_seconds(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60, seconds % 60)
}

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.with_timezone(&Local).format(DATE_TIME_FORMAT).to_string()
}

pub fn format_optional(value: Option<&DateTime<Utc>>) -> String {
    value.map(format_timestamp).unwrap_or_default()
}

pub fn format_flag(value: bool) -> &'static str {
    if value {
        "✔"
    } else {
        ""
    }
}

/// Parses a local `YYYY-MM-DD HH:MM` or `YYYY-MM-DD` string.
pub fn parse_local(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    let naive = match NaiveDateTime::parse_from_str(input, DATE_TIME_FORMAT) {
        Ok(value) => value,
        Err(_) => match NaiveDate::parse_from_str(input, DATE_FORMAT) {
            Ok(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            Err(_) => bail!("'{input}' is not a date in the form YYYY-MM-DD or YYYY-MM-DD HH:MM"),
        },
    };
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => Ok(local.with_timezone(&Utc)),
        None => bail!("'{input}' does not exist in the local time zone"),
    }
}
