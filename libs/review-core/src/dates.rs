//! Calendar-day helpers.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Timelike};

use crate::error::{CoreError, Result};

/// The study day `now` falls on.
///
/// Hours before `daily_reset_hour` count toward the previous day, so late
/// sessions keep their streak. A reset hour of 0 is the plain calendar date.
pub fn study_day<Tz: TimeZone>(now: &DateTime<Tz>, daily_reset_hour: u32) -> NaiveDate {
    if now.hour() < daily_reset_hour {
        (now.clone() - Duration::days(1)).date_naive()
    } else {
        now.date_naive()
    }
}

/// Today's study day on the local wall clock.
pub fn today(daily_reset_hour: u32) -> NaiveDate {
    study_day(&Local::now(), daily_reset_hour)
}

/// Parse a stored review date: `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_review_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| CoreError::InvalidDate(value.to_string()))
}
