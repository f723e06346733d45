//! Row budget sizing from a measured probe render.
//!
//! Phase one hands the host a [`ProbeRequest`] describing a single placeholder
//! event row (plus the header row when enabled). Phase two takes the pixel
//! heights the host measured and turns them into a row limit. Heights come
//! in as plain values, so the protocol runs without a rendering surface.

use crate::models::segment::SpanStyle;
use crate::models::settings::RowSettings;

/// Row limit used when nothing has been measured yet.
pub const DEFAULT_ROW_LIMIT: usize = 1;

/// Identifies one probe request; later tickets supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProbeTicket(pub u64);

/// What the host must render for the measurement pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    pub ticket: ProbeTicket,
    pub columns: usize,
    /// Placeholder event spanning the full row width
    pub placeholder: SpanStyle,
    pub with_header: bool,
}

/// Pixel heights read back from the rendered probe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProbeMeasurement {
    pub event_row_height: f32,
    pub header_height: Option<f32>,
    /// Height of the row's own root surface
    pub root_height: f32,
    /// Height of the host-provided container, when there is one
    pub container_height: Option<f32>,
}

impl ProbeMeasurement {
    /// Vertical space left for event rows once the header is drawn
    pub fn available_height(&self) -> f32 {
        let surface = self.container_height.unwrap_or(self.root_height);
        surface - self.header_height.unwrap_or(0.0)
    }
}

/// Host-side renderer for probe requests.
#[cfg_attr(test, mockall::automock)]
pub trait ProbeSurface {
    /// Render the probe and read its heights; `None` while the surface is not
    /// laid out yet.
    fn measure(&self, request: &ProbeRequest) -> Option<ProbeMeasurement>;
}

/// How many rows fit the measured space, never less than one.
///
/// An unusable row height keeps `previous` (or [`DEFAULT_ROW_LIMIT`]).
pub fn row_limit(measurement: &ProbeMeasurement, previous: Option<usize>) -> usize {
    let row_height = measurement.event_row_height;
    if !row_height.is_finite() || row_height <= 0.0 {
        let fallback = previous.unwrap_or(DEFAULT_ROW_LIMIT).max(1);
        log::warn!(
            "Probe row height {} is not measurable, keeping row limit {}",
            row_height,
            fallback
        );
        return fallback;
    }

    let rows = (measurement.available_height() / row_height).floor();
    // f32::max ignores NaN, so a NaN ratio also lands on 1.
    rows.max(1.0) as usize
}

/// Levels the packer may open.
///
/// A measured `row_limit` is capped by `max_rows` first. One row is kept back
/// for the overflow indicator, and the result is clamped to
/// `[max(min_rows, 1), max_rows]`.
pub fn max_levels(settings: &RowSettings, row_limit: Option<usize>) -> usize {
    let upper = settings.max_rows_or_unbounded();
    let rows = match row_limit {
        Some(limit) => limit.min(upper),
        None => upper,
    };

    rows.saturating_sub(1)
        .max(1)
        .max(settings.min_rows)
        .min(upper)
}
