// Date utility functions
// Day-granularity helpers used when mapping instants onto date columns

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Calendar day on which an event starting at `start` is first visible.
pub fn start_day(start: NaiveDateTime) -> NaiveDate {
    start.date()
}

/// Calendar day on which an event ending at `end` is last visible.
///
/// An end exactly at midnight is exclusive: the event stops at the end of the
/// previous day, unless it is a zero-length event that starts at that midnight.
pub fn end_day(start: NaiveDateTime, end: NaiveDateTime) -> NaiveDate {
    let date = end.date();
    if end > start && end.time() == NaiveTime::MIN {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    }
}

/// Whole days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
