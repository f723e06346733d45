//! Orchestrates one date row: window, segments, sizing and packing.

use chrono::NaiveDate;

use super::levels::pack;
use super::segments::{derive_segments, Accessors};
use super::sizing::{
    max_levels, row_limit, ProbeMeasurement, ProbeRequest, ProbeSurface, ProbeTicket,
    DEFAULT_ROW_LIMIT,
};
use super::window::{end_of_range, DateWindow};
use super::{LayoutError, Result};
use crate::models::segment::{Overflow, Segment, SpanStyle};
use crate::models::settings::RowSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutPhase {
    Idle,
    DeriveWindow,
    DeriveSegments,
    Probe,
    Measure,
    Pack,
    Done,
}

fn enter(phase: LayoutPhase) {
    log::trace!("Date row layout: {:?}", phase);
}

/// Inclusive, 0-based slot indices picked by a selection gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRange {
    pub start: usize,
    pub end: usize,
}

/// One column header to hand to the header renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub date: NaiveDate,
    pub index: usize,
    pub style: SpanStyle,
    pub is_today: bool,
}

/// Build one header cell per date column.
pub fn header_cells(range: &[NaiveDate], today: NaiveDate) -> Vec<HeaderCell> {
    let total = range.len();
    range
        .iter()
        .enumerate()
        .map(|(index, &date)| HeaderCell {
            date,
            index,
            style: SpanStyle::new(index + 1, 1, total),
            is_today: date == today,
        })
        .collect()
}

/// One positioned cell within a level, left to right.
#[derive(Debug, PartialEq)]
pub enum RowCell<'e, E> {
    Gap(SpanStyle),
    Segment(Segment<'e, E>, SpanStyle),
}

/// Events to list when a column's "+N more" indicator is activated.
#[derive(Debug, PartialEq)]
pub struct ShowMore<'e, E> {
    /// Every event intersecting the column, placed or not
    pub events: Vec<&'e E>,
    pub date: NaiveDate,
    pub column: usize,
}

/// Final layout of one date row.
#[derive(Debug)]
pub struct RowLayout<'e, E> {
    pub window: DateWindow,
    pub range: Vec<NaiveDate>,
    /// All visible segments, in event input order
    pub segments: Vec<Segment<'e, E>>,
    pub levels: Vec<Vec<Segment<'e, E>>>,
    pub extra: Vec<Segment<'e, E>>,
    pub overflow: Overflow,
    /// Level budget the packer ran with
    pub max_levels: usize,
    /// Row limit derived from a measurement, to pass into the next pass
    pub row_limit: Option<usize>,
}

impl<'e, E> RowLayout<'e, E> {
    pub fn columns(&self) -> usize {
        self.window.columns
    }

    fn check_column(&self, column: usize) -> Result<()> {
        if column == 0 || column > self.columns() {
            return Err(LayoutError::ColumnOutOfRange {
                column,
                columns: self.columns(),
            });
        }
        Ok(())
    }

    /// Every event whose segment covers the 1-based `column`.
    pub fn events_in_column(&self, column: usize) -> Result<Vec<&'e E>> {
        self.check_column(column)?;
        Ok(self
            .segments
            .iter()
            .filter(|segment| segment.contains(column))
            .map(|segment| segment.event)
            .collect())
    }

    pub fn show_more(&self, column: usize) -> Result<ShowMore<'e, E>> {
        let events = self.events_in_column(column)?;
        Ok(ShowMore {
            events,
            date: self.range[column - 1],
            column,
        })
    }

    /// Describe a level as consecutive gap and segment cells covering every column.
    ///
    /// Returns an empty list for a level index past the end.
    pub fn level_cells(&self, level: usize) -> Vec<RowCell<'e, E>> {
        let Some(segments) = self.levels.get(level) else {
            return Vec::new();
        };

        let total = self.columns();
        let mut cells = Vec::with_capacity(segments.len() * 2 + 1);
        let mut next = 1;

        for &segment in segments {
            if segment.left > next {
                cells.push(RowCell::Gap(SpanStyle::new(next, segment.left - next, total)));
            }
            cells.push(RowCell::Segment(segment, segment.style(total)));
            next = segment.right + 1;
        }

        if next <= total {
            cells.push(RowCell::Gap(SpanStyle::new(next, total + 1 - next, total)));
        }

        cells
    }

    /// Columns showing a "+N more" indicator, with their counts
    pub fn overflow_cells(&self) -> Vec<(usize, usize)> {
        self.overflow.iter().collect()
    }
}

/// Layout engine for a week or month date row.
pub struct DateContentRow<E> {
    settings: RowSettings,
    accessors: Accessors<E>,
    latest_probe: u64,
}

impl<E> DateContentRow<E> {
    pub fn new(settings: RowSettings, accessors: Accessors<E>) -> Result<Self> {
        settings.validate().map_err(LayoutError::InvalidSettings)?;
        Ok(Self {
            settings,
            accessors,
            latest_probe: 0,
        })
    }

    pub fn settings(&self) -> &RowSettings {
        &self.settings
    }

    /// Lay out events with the configured row budget only.
    pub fn layout<'e>(&self, events: &'e [E], range: &[NaiveDate]) -> Result<RowLayout<'e, E>> {
        self.run(events, range, None)
    }

    /// Phase one of the measured protocol: describe the probe to render.
    ///
    /// Issuing a new probe supersedes any probe still awaiting measurement.
    pub fn probe(&mut self, range: &[NaiveDate]) -> Result<ProbeRequest> {
        let window = end_of_range(range)?;
        self.latest_probe += 1;
        enter(LayoutPhase::Probe);

        Ok(ProbeRequest {
            ticket: ProbeTicket(self.latest_probe),
            columns: window.columns,
            placeholder: SpanStyle::new(1, window.columns, window.columns),
            with_header: self.settings.show_header,
        })
    }

    /// Phase two: lay out events using heights measured for `ticket`.
    ///
    /// `previous` is the row limit from the last pass; it is kept when the
    /// measurement has no usable row height.
    pub fn layout_measured<'e>(
        &self,
        ticket: ProbeTicket,
        measurement: &ProbeMeasurement,
        previous: Option<usize>,
        events: &'e [E],
        range: &[NaiveDate],
    ) -> Result<RowLayout<'e, E>> {
        if ticket.0 != self.latest_probe {
            log::warn!("Dropping measurement for superseded probe {}", ticket.0);
            return Err(LayoutError::SupersededProbe {
                ticket: ticket.0,
                latest: self.latest_probe,
            });
        }

        enter(LayoutPhase::Measure);
        let limit = row_limit(measurement, previous);
        self.run(events, range, Some(limit))
    }

    /// Run both phases against a host surface.
    ///
    /// A surface that cannot be measured yet keeps `previous` as the row limit.
    pub fn measure_and_layout<'e>(
        &mut self,
        surface: &dyn ProbeSurface,
        previous: Option<usize>,
        events: &'e [E],
        range: &[NaiveDate],
    ) -> Result<RowLayout<'e, E>> {
        let request = self.probe(range)?;
        match surface.measure(&request) {
            Some(measurement) => {
                self.layout_measured(request.ticket, &measurement, previous, events, range)
            }
            None => {
                let limit = previous.unwrap_or(DEFAULT_ROW_LIMIT).max(1);
                log::warn!("Probe surface not ready, using row limit {}", limit);
                self.run(events, range, Some(limit))
            }
        }
    }

    /// Resolve a selected slot range to its dates.
    pub fn select_slot(range: &[NaiveDate], slot: SlotRange) -> Result<&[NaiveDate]> {
        if slot.start > slot.end || slot.end >= range.len() {
            return Err(LayoutError::SlotOutOfRange {
                start: slot.start,
                end: slot.end,
                len: range.len(),
            });
        }
        Ok(&range[slot.start..=slot.end])
    }

    fn run<'e>(
        &self,
        events: &'e [E],
        range: &[NaiveDate],
        limit: Option<usize>,
    ) -> Result<RowLayout<'e, E>> {
        enter(LayoutPhase::DeriveWindow);
        let window = end_of_range(range)?;

        enter(LayoutPhase::DeriveSegments);
        let segments = derive_segments(events, &window, &self.accessors);

        enter(LayoutPhase::Pack);
        let budget = max_levels(&self.settings, limit);
        let packing = pack(&segments, budget)?;

        let mut levels = packing.levels;
        while levels.len() < self.settings.min_rows {
            levels.push(Vec::new());
        }

        enter(LayoutPhase::Done);
        let layout = RowLayout {
            window,
            range: range.to_vec(),
            segments,
            levels,
            extra: packing.extra,
            overflow: packing.overflow,
            max_levels: budget,
            row_limit: limit,
        };
        enter(LayoutPhase::Idle);

        Ok(layout)
    }
}
