//! Calendar-date helpers for the date picker.

use chrono::{Datelike, NaiveDate};

use crate::error::PickerError;

/// Number of days in `month` (1-12) of `year`. Months outside 1-12 are
/// clamped into range.
///
/// Taken from chrono: the day before the first of the following month.
/// December of chrono's last year has no following month and is 31 days.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let month = month.clamp(1, 12);
    let (next_year, next_month) = if month == 12 {
        (year.saturating_add(1), 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

/// Build a date, clamping `day` down to the last day of the month (and up to 1).
///
/// Never rolls over into the next month. Returns `None` only when the year is
/// outside chrono's supported range or the month is not 1-12.
pub fn clamp_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Strict `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> Result<NaiveDate, PickerError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| PickerError::InvalidDate {
        input: input.to_owned(),
        message: e.to_string(),
    })
}

/// Parse `YYYY-MM-DD` leniently.
///
/// Each part that parses and is in range replaces the matching part of
/// `fallback`; the result's day is then clamped into its month.
pub fn parse_date_lenient(input: &str, fallback: NaiveDate) -> NaiveDate {
    let mut parts = input.trim().splitn(3, '-').map(str::trim);

    let year = parts
        .next()
        .and_then(|p| p.parse::<i32>().ok())
        .unwrap_or(fallback.year());
    let month = parts
        .next()
        .and_then(|p| p.parse::<u32>().ok())
        .filter(|m| (1..=12).contains(m))
        .unwrap_or(fallback.month());
    let day = parts
        .next()
        .and_then(|p| p.parse::<u32>().ok())
        .filter(|d| (1..=31).contains(d))
        .unwrap_or(fallback.day());

    clamp_date(year, month, day).unwrap_or(fallback)
}

// ===========================================================================
// Tests
// ===========================================================================
