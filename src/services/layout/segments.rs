use chrono::NaiveDateTime;

use super::window::DateWindow;
use crate::models::event::Event;
use crate::models::segment::Segment;
use crate::utils::date::{days_between, end_day, start_day};

type Accessor<E> = Box<dyn Fn(&E) -> NaiveDateTime>;

/// Injected start/end extraction for any event record type.
pub struct Accessors<E> {
    start: Accessor<E>,
    end: Accessor<E>,
}

impl<E> Accessors<E> {
    pub fn new(
        start: impl Fn(&E) -> NaiveDateTime + 'static,
        end: impl Fn(&E) -> NaiveDateTime + 'static,
    ) -> Self {
        Self {
            start: Box::new(start),
            end: Box::new(end),
        }
    }

    pub fn start(&self, event: &E) -> NaiveDateTime {
        (self.start)(event)
    }

    pub fn end(&self, event: &E) -> NaiveDateTime {
        (self.end)(event)
    }
}

impl Accessors<Event> {
    /// Accessors for the built-in event model, read in local time
    pub fn for_events() -> Self {
        Self::new(
            |event: &Event| event.start.naive_local(),
            |event: &Event| event.end.naive_local(),
        )
    }
}

/// Clip one event to the window. `None` when the event is not visible at all.
pub fn derive_segment<'e, E>(
    event: &'e E,
    window: &DateWindow,
    accessors: &Accessors<E>,
) -> Option<Segment<'e, E>> {
    let event_start = accessors.start(event);
    let event_end = accessors.end(event);

    let clipped_start = start_day(event_start).max(window.first);
    let clipped_end = end_day(event_start, event_end).min(window.last);

    if clipped_start > clipped_end {
        return None;
    }

    let column = |day| {
        let offset = days_between(window.first, day).max(0) as usize;
        (offset + 1).min(window.columns)
    };

    Some(Segment::new(event, column(clipped_start), column(clipped_end)))
}

/// Derive segments for every visible event, preserving input order.
pub fn derive_segments<'e, E>(
    events: &'e [E],
    window: &DateWindow,
    accessors: &Accessors<E>,
) -> Vec<Segment<'e, E>> {
    let segments: Vec<_> = events
        .iter()
        .filter_map(|event| derive_segment(event, window, accessors))
        .collect();

    log::trace!(
        "Derived {} segments from {} events ({} outside window)",
        segments.len(),
        events.len(),
        events.len() - segments.len()
    );

    segments
}
