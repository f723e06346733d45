//! Event-to-row layout for a single calendar date row.
//!
//! A render pass runs: date window, segment derivation, optional probe
//! measurement, level packing. Every pass starts from scratch; nothing is
//! carried between passes except what the caller hands back in (the previous
//! row limit, the latest probe ticket).

use thiserror::Error;

pub mod engine;
pub mod levels;
pub mod segments;
pub mod sizing;
pub mod window;

pub use engine::{header_cells, DateContentRow, HeaderCell, RowCell, RowLayout, ShowMore, SlotRange};
pub use levels::{pack, LevelPacking};
pub use segments::{derive_segment, derive_segments, Accessors};
pub use sizing::{max_levels, row_limit, ProbeMeasurement, ProbeRequest, ProbeSurface, ProbeTicket};
pub use window::{end_of_range, DateWindow};

/// Caller contract violations raised by the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("date range must contain at least one date")]
    EmptyRange,

    #[error("row budget must allow at least one level, got {0}")]
    InvalidMaxLevels(usize),

    #[error("segment {left}..={right} is not a valid 1-based column span")]
    InvalidSegment { left: usize, right: usize },

    #[error("invalid row settings: {0}")]
    InvalidSettings(String),

    #[error("column {column} is outside 1..={columns}")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("slot selection {start}..={end} is outside a range of {len} dates")]
    SlotOutOfRange { start: usize, end: usize, len: usize },

    #[error("probe {ticket} was superseded by probe {latest}")]
    SupersededProbe { ticket: u64, latest: u64 },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
