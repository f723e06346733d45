use chrono::NaiveDate;

use super::{LayoutError, Result};

/// Visible window of a date row: first and last date column, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub columns: usize,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }
}

/// Compute the clipping window for an ordered, non-empty date range.
pub fn end_of_range(range: &[NaiveDate]) -> Result<DateWindow> {
    match (range.first(), range.last()) {
        (Some(&first), Some(&last)) => Ok(DateWindow {
            first,
            last,
            columns: range.len(),
        }),
        _ => Err(LayoutError::EmptyRange),
    }
}
