// Segment module
// Derived per-render values: clipped event spans, span geometry and overflow counts

use std::collections::BTreeMap;

/// An event clipped to the visible date window.
///
/// `left` and `right` are 1-based, inclusive column indices with
/// `1 <= left <= right <= columns`.
#[derive(Debug, PartialEq, Eq)]
pub struct Segment<'e, E> {
    pub event: &'e E,
    pub left: usize,
    pub right: usize,
}

// Manual impls: a segment only borrows its event, so copying it never needs `E: Clone`.
impl<E> Clone for Segment<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Segment<'_, E> {}

impl<'e, E> Segment<'e, E> {
    pub fn new(event: &'e E, left: usize, right: usize) -> Self {
        Self { event, left, right }
    }

    /// Number of columns covered
    pub fn span(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn contains(&self, column: usize) -> bool {
        self.left <= column && column <= self.right
    }

    /// Closed-interval overlap test
    pub fn overlaps(&self, other: &Segment<'_, E>) -> bool {
        self.left <= other.right && other.left <= self.right
    }

    pub fn style(&self, columns: usize) -> SpanStyle {
        SpanStyle::new(self.left, self.span(), columns)
    }
}

/// Geometry handed to renderers: a run of `span` columns starting at the
/// 1-based column `start`, out of `total` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanStyle {
    pub start: usize,
    pub span: usize,
    pub total: usize,
}

impl SpanStyle {
    pub fn new(start: usize, span: usize, total: usize) -> Self {
        Self { start, span, total }
    }

    pub fn width_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.span as f64 / self.total as f64 * 100.0
    }

    pub fn left_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.start.saturating_sub(1) as f64 / self.total as f64 * 100.0
    }
}

/// Per-column count of segments that did not fit the row budget.
///
/// Columns with no overflow are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overflow {
    counts: BTreeMap<usize, usize>,
}

impl Overflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one rejected segment against every column it covers
    pub fn record<E>(&mut self, segment: &Segment<'_, E>) {
        for column in segment.left..=segment.right {
            *self.counts.entry(column).or_insert(0) += 1;
        }
    }

    pub fn count(&self, column: usize) -> usize {
        self.counts.get(&column).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(column, count)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(&column, &count)| (column, count))
    }
}
