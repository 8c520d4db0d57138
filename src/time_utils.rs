// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// English month name and day of month, e.g. `"March 7"`.
pub fn format_month_day(date: DateTime<Utc>) -> String {
    format!("{} {}", date.format("%B"), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_month_day_has_no_padding() {
        let date = Utc.with_ymd_and_hms(2025, 1, 5, 23, 59, 59).unwrap();
        assert_eq!(format_month_day(date), "January 5");
    }

    #[test]
    fn test_rfc3339_drops_subseconds() {
        let date = Utc.with_ymd_and_hms(2025, 11, 30, 8, 0, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(format_utc_rfc3339(date), "2025-11-30T08:00:00Z");
    }
}
