// Test fixtures - reusable test data
// Provides consistent date ranges and events across all test files
#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Sample date ranges for testing
pub mod dates {
    use super::*;

    /// Returns Monday, Jan 6, 2025
    pub fn week_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    /// Seven consecutive dates starting at `week_start()`
    pub fn week() -> Vec<NaiveDate> {
        days_from(week_start(), 7)
    }

    pub fn days_from(first: NaiveDate, count: i64) -> Vec<NaiveDate> {
        (0..count).map(|offset| first + Duration::days(offset)).collect()
    }

    /// Instant on the 1-based `column` of `week()` at `hour`
    pub fn column_at(column: i64, hour: u32) -> NaiveDateTime {
        (week_start() + Duration::days(column - 1))
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// Minimal event record with its own field names, read through accessors
    #[derive(Debug, Clone, PartialEq)]
    pub struct Booking {
        pub label: String,
        pub opens: NaiveDateTime,
        pub closes: NaiveDateTime,
    }

    /// Booking covering 1-based columns `left..=right` of `dates::week()`
    pub fn spanning(label: &str, left: i64, right: i64) -> Booking {
        Booking {
            label: label.to_string(),
            opens: dates::column_at(left, 9),
            closes: dates::column_at(right, 17),
        }
    }

    pub fn accessors() -> calendar_row_layout::services::layout::Accessors<Booking> {
        calendar_row_layout::services::layout::Accessors::new(
            |b: &Booking| b.opens,
            |b: &Booking| b.closes,
        )
    }
}
