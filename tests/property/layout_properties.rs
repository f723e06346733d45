// Property-based tests for segment derivation and level packing
// Exercises the layout invariants with random events and budgets

#[path = "../fixtures/mod.rs"]
mod fixtures;

use calendar_row_layout::models::segment::Segment;
use calendar_row_layout::services::layout::{
    derive_segment, derive_segments, end_of_range, pack, row_limit, ProbeMeasurement,
};
use fixtures::dates::{column_at, week};
use fixtures::events::{accessors, Booking};
use proptest::prelude::*;

/// Bookings with start and end offsets (in days) around a 7-day week
fn booking_sets() -> impl Strategy<Value = Vec<Booking>> {
    prop::collection::vec((-5i64..12, 0i64..10, 0u32..24), 0..24).prop_map(|raw| {
        raw
            .into_iter()
            .enumerate()
            .map(|(i, (start, length, hour))| Booking {
                label: format!("E{}", i),
                opens: column_at(start, hour),
                closes: column_at(start + length, 23),
            })
            .collect()
    })
}

fn covering(segments: &[Segment<'_, Booking>], column: usize) -> usize {
    segments.iter().filter(|s| s.contains(column)).count()
}

proptest! {
    /// Property: a derived segment always sits inside the window
    #[test]
    fn prop_segments_are_clipped_to_window(bookings in booking_sets()) {
        let range = week();
        let window = end_of_range(&range).unwrap();
        let a = accessors();

        for booking in &bookings {
            if let Some(segment) = derive_segment(booking, &window, &a) {
                prop_assert!(1 <= segment.left);
                prop_assert!(segment.left <= segment.right);
                prop_assert!(segment.right <= range.len());
                prop_assert!(window.first <= range[segment.left - 1]);
                prop_assert!(range[segment.right - 1] <= window.last);
            } else {
                let before = booking.closes.date() < window.first;
                let after = booking.opens.date() > window.last;
                prop_assert!(before || after);
            }
        }
    }

    /// Property: no two segments in one level overlap, and the budget holds
    #[test]
    fn prop_levels_never_overlap(bookings in booking_sets(), max_levels in 1usize..6) {
        let window = end_of_range(&week()).unwrap();
        let a = accessors();
        let segments = derive_segments(&bookings, &window, &a);

        let packing = pack(&segments, max_levels).unwrap();

        prop_assert!(packing.levels.len() <= max_levels);
        for level in &packing.levels {
            for (i, first) in level.iter().enumerate() {
                for second in level.iter().skip(i + 1) {
                    prop_assert!(!first.overlaps(second));
                }
            }
        }
    }

    /// Property: every segment is either placed once or counted as overflow
    #[test]
    fn prop_overflow_conserves_segments(bookings in booking_sets(), max_levels in 1usize..6) {
        let window = end_of_range(&week()).unwrap();
        let a = accessors();
        let segments = derive_segments(&bookings, &window, &a);

        let packing = pack(&segments, max_levels).unwrap();
        let placed: Vec<_> = packing.levels.iter().flatten().copied().collect();

        prop_assert_eq!(placed.len() + packing.extra.len(), segments.len());
        for column in 1..=window.columns {
            let total = covering(&segments, column);
            let in_levels = covering(&placed, column);
            prop_assert_eq!(total, in_levels + packing.overflow.count(column));
            prop_assert!(packing.overflow.count(column) >= total.saturating_sub(max_levels));
        }
    }

    /// Property: packing the same segments twice gives the same grid
    #[test]
    fn prop_packing_is_idempotent(bookings in booking_sets(), max_levels in 1usize..6) {
        let window = end_of_range(&week()).unwrap();
        let a = accessors();
        let segments = derive_segments(&bookings, &window, &a);

        let first = pack(&segments, max_levels).unwrap();
        let second = pack(&segments, max_levels).unwrap();

        prop_assert_eq!(first.levels, second.levels);
        prop_assert_eq!(first.overflow, second.overflow);
    }

    /// Property: the measured row limit never drops below one
    #[test]
    fn prop_row_limit_at_least_one(
        row in -50.0f32..80.0,
        header in prop::option::of(0.0f32..60.0),
        root in 0.0f32..400.0,
        previous in prop::option::of(0usize..10),
    ) {
        let measurement = ProbeMeasurement {
            event_row_height: row,
            header_height: header,
            root_height: root,
            container_height: None,
        };
        prop_assert!(row_limit(&measurement, previous) >= 1);
    }
}

#[cfg(test)]
mod additional_tests {
    use super::*;

    #[test]
    fn test_unlimited_budget_places_everything() {
        let window = end_of_range(&week()).unwrap();
        let a = accessors();
        let bookings: Vec<_> = (0..5)
            .map(|i| fixtures::events::spanning(&format!("E{}", i), 1, 7))
            .collect();
        let segments = derive_segments(&bookings, &window, &a);

        let packing = pack(&segments, usize::MAX).unwrap();

        assert_eq!(packing.levels.len(), 5);
        assert!(packing.overflow.is_empty());
    }
}
