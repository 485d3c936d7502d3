// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pure date and clock arithmetic shared by the scheduling engines.
//!
//! Months are 0-indexed (0 = January) to match the calendar grid the
//! frontend renders; formatted dates are always `YYYY-MM-DD`.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};

/// Parse a 24-hour `HH:MM` clock string to minutes since midnight.
///
/// Inputs are expected to be well-formed; malformed components count
/// as zero rather than failing the caller.
pub fn minutes_of_day(clock: &str) -> u32 {
    let (h, m) = clock.split_once(':').unwrap_or((clock, "0"));
    let hours: u32 = h.trim().parse().unwrap_or(0);
    let minutes: u32 = m.trim().parse().unwrap_or(0);
    hours * 60 + minutes
}

/// Format minutes since midnight as a zero-padded `HH:MM` string.
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Number of days in a month (28..=31), or 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month + 1, 1) else {
        return 0;
    };
    let next = if month == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)
    };
    next.map(|n| (n - first).num_days() as u32).unwrap_or(0)
}

/// Weekday of the first day of a month, 0 = Sunday.
pub fn first_weekday_of_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Format a calendar day as `YYYY-MM-DD` with zero-padded month/day.
pub fn format_date(year: i32, month: u32, day: u32) -> String {
    format!("{}-{:02}-{:02}", year, month + 1, day)
}

/// `YYYY-MM-` prefix shared by every date in a month; used to select a
/// month's records out of a larger shift set.
pub fn month_prefix(year: i32, month: u32) -> String {
    format!("{}-{:02}-", year, month + 1)
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}
