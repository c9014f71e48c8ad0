use chrono::{NaiveDate, Utc};

use crate::errors::Result;

/// Current Unix time in whole seconds.
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Parses a `DD/MM/YYYY` history start date into the Unix timestamp of
/// midnight UTC on that day.
pub fn parse_history_start(value: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(value.trim(), "%d/%m/%Y")?;
    Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc().timestamp())
}
