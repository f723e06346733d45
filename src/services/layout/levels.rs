use crate::models::segment::{Overflow, Segment};

use super::{LayoutError, Result};

/// Result of packing segments into rows.
#[derive(Debug)]
pub struct LevelPacking<'e, E> {
    /// Each level holds mutually non-overlapping segments, ordered by `left`.
    pub levels: Vec<Vec<Segment<'e, E>>>,
    /// Segments rejected because every level was taken, in packing order.
    pub extra: Vec<Segment<'e, E>>,
    pub overflow: Overflow,
}

impl<E> Clone for LevelPacking<'_, E> {
    fn clone(&self) -> Self {
        Self {
            levels: self.levels.clone(),
            extra: self.extra.clone(),
            overflow: self.overflow.clone(),
        }
    }
}

/// Greedy first-fit packing of segments into at most `max_levels` levels.
///
/// Segments are visited by ascending `left`, then longer span first, then
/// input order. Each goes into the first level whose rightmost occupied
/// column lies before it; when no level fits and the budget is spent, the
/// segment is counted as overflow in every column it covers.
pub fn pack<'e, E>(segments: &[Segment<'e, E>], max_levels: usize) -> Result<LevelPacking<'e, E>> {
    if max_levels == 0 {
        return Err(LayoutError::InvalidMaxLevels(max_levels));
    }

    if let Some(bad) = segments.iter().find(|s| s.left == 0 || s.left > s.right) {
        return Err(LayoutError::InvalidSegment {
            left: bad.left,
            right: bad.right,
        });
    }

    let mut order: Vec<&Segment<'e, E>> = segments.iter().collect();
    // Stable sort, so equal keys keep input order.
    order.sort_by(|a, b| a.left.cmp(&b.left).then_with(|| b.span().cmp(&a.span())));

    let mut levels: Vec<Vec<Segment<'e, E>>> = Vec::new();
    // Rightmost occupied column per level, indexed like `levels`.
    let mut ends: Vec<usize> = Vec::new();
    let mut extra = Vec::new();
    let mut overflow = Overflow::new();

    for &segment in order {
        match ends.iter().position(|&end| end < segment.left) {
            Some(level) => {
                ends[level] = segment.right;
                levels[level].push(segment);
            }
            None if levels.len() < max_levels => {
                ends.push(segment.right);
                levels.push(vec![segment]);
            }
            None => {
                overflow.record(&segment);
                extra.push(segment);
            }
        }
    }

    log::debug!(
        "Packed {} segments into {} levels (budget {}), {} overflowed",
        segments.len(),
        levels.len(),
        max_levels,
        extra.len()
    );

    Ok(LevelPacking {
        levels,
        extra,
        overflow,
    })
}
