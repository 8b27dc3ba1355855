//! Timeline mapping from calendar days to horizontal pixels.
//!
//! The mapping is affine: `x = days(date - min_date) * day_width * scale + offset`.
//! Everything is day-granular; there is no timezone or sub-day modelling.

use chrono::{Duration, NaiveDate};

use crate::flatten::FlatRow;

/// Smallest allowed zoom factor.
pub const MIN_SCALE: f64 = 0.5;
/// Largest allowed zoom factor.
pub const MAX_SCALE: f64 = 3.0;
/// Multiplier applied by one zoom step.
pub const ZOOM_FACTOR: f64 = 1.2;
/// Days between gridlines.
pub const GRID_STEP_DAYS: i64 = 7;

/// Date range covered by the visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Earliest start among the rows.
    pub min_date: NaiveDate,
    /// Latest end among the rows.
    pub max_date: NaiveDate,
}

impl Bounds {
    /// Number of whole days from `min_date` to `max_date`.
    pub fn total_days(&self) -> i64 {
        (self.max_date - self.min_date).num_days()
    }
}

/// Compute the date bounds of a row set.
///
/// Returns `None` for an empty row set; callers skip the frame instead of
/// mapping against undefined bounds.
pub fn compute_bounds(rows: &[FlatRow<'_>]) -> Option<Bounds> {
    let min_date = rows.iter().map(|row| row.task.start).min()?;
    let max_date = rows.iter().map(|row| row.task.end).max()?;
    Some(Bounds { min_date, max_date })
}

/// Zoom and pan applied to the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Multiplier on the per-day pixel width, kept within `[MIN_SCALE, MAX_SCALE]`.
    pub scale: f64,
    /// Additive pixel shift applied to every x-coordinate. Unbounded.
    pub offset: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: 0.0,
        }
    }
}

impl ViewTransform {
    /// One zoom step in, clamped to `MAX_SCALE`.
    pub fn zoomed_in(self) -> Self {
        Self {
            scale: (self.scale * ZOOM_FACTOR).min(MAX_SCALE),
            ..self
        }
    }

    /// One zoom step out, clamped to `MIN_SCALE`.
    pub fn zoomed_out(self) -> Self {
        Self {
            scale: (self.scale / ZOOM_FACTOR).max(MIN_SCALE),
            ..self
        }
    }

    /// Shift by `delta` pixels.
    pub fn panned(self, delta: f64) -> Self {
        Self {
            offset: self.offset + delta,
            ..self
        }
    }
}

/// Map a date to its x-coordinate in pixels.
pub fn date_to_x(
    date: NaiveDate,
    min_date: NaiveDate,
    transform: &ViewTransform,
    day_width: f64,
) -> f64 {
    let days = (date - min_date).num_days() as f64;
    days * day_width * transform.scale + transform.offset
}

/// A vertical gridline at a week boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub date: NaiveDate,
    pub x: f64,
}

/// Gridlines every seven days from `min_date` up to and including `max_date`.
///
/// The last partial week is not padded out.
pub fn gridlines(bounds: &Bounds, transform: &ViewTransform, day_width: f64) -> Vec<GridLine> {
    (0..=bounds.total_days().max(0))
        .step_by(GRID_STEP_DAYS as usize)
        .map(|day| {
            let date = bounds.min_date + Duration::days(day);
            GridLine {
                date,
                x: date_to_x(date, bounds.min_date, transform, day_width),
            }
        })
        .collect()
}
