//! Row geometry shared by painting and hit-testing.
//!
//! [`row_geometry`] is the single source of a row's bar rectangle and label
//! origin. The renderer and the hit-tester both call it, so what is drawn
//! and what is hoverable cannot drift apart. On a surface that paints whole
//! cells, the bar is snapped to the [`CellGrid`] here, once, for both.

use std::ops::Range;

use crate::flatten::FlatRow;
use crate::timeline::{Bounds, ViewTransform, date_to_x};

/// Fixed pixel metrics of the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMetrics {
    /// Width of one day at scale 1.0.
    pub day_width: f64,
    /// Height of a task bar.
    pub task_height: f64,
    /// Vertical gap between bars.
    pub task_padding: f64,
    /// Label indent per depth level.
    pub indent_width: f64,
    /// Y of the first bar, leaving room for the date header.
    pub header_offset: f64,
    /// Horizontal inset of a label from its bar's left edge.
    pub label_inset: f64,
    /// Label baseline measured from the bar's top edge.
    pub label_baseline: f64,
    /// Baseline of the date header labels.
    pub header_baseline: f64,
    /// Y where gridlines start.
    pub grid_top: f64,
    /// Cell raster the bars are snapped to, when the surface has one.
    pub cell_grid: Option<CellGrid>,
}

impl Default for ChartMetrics {
    fn default() -> Self {
        Self {
            day_width: 20.0,
            task_height: 40.0,
            task_padding: 10.0,
            indent_width: 20.0,
            header_offset: 40.0,
            label_inset: 5.0,
            label_baseline: 25.0,
            header_baseline: 20.0,
            grid_top: 25.0,
            cell_grid: None,
        }
    }
}

impl ChartMetrics {
    /// Vertical distance between consecutive rows.
    pub fn row_pitch(&self) -> f64 {
        self.task_height + self.task_padding
    }
}

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Pixel size of the cells of a raster surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGrid {
    pub width: f64,
    pub height: f64,
}

impl CellGrid {
    /// Columns and rows of the cells `rect` covers.
    ///
    /// A cell is covered when it overlaps the half-open extent of the
    /// rectangle. A degenerate rectangle covers the cell holding its origin.
    pub fn span(&self, rect: &PixelRect) -> (Range<i64>, Range<i64>) {
        (
            axis_span(rect.x, rect.right(), self.width),
            axis_span(rect.y, rect.bottom(), self.height),
        )
    }

    /// Widen `rect` to the whole cells it covers.
    pub fn snap(&self, rect: PixelRect) -> PixelRect {
        let (cols, rows) = self.span(&rect);
        PixelRect::new(
            cols.start as f64 * self.width,
            rows.start as f64 * self.height,
            (cols.end - cols.start) as f64 * self.width,
            (rows.end - rows.start) as f64 * self.height,
        )
    }
}

fn axis_span(start: f64, end: f64, cell: f64) -> Range<i64> {
    let first = (start / cell).floor() as i64;
    let last = ((end / cell).ceil() as i64).max(first + 1);
    first..last
}

/// Pixel geometry of one flattened row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowGeometry {
    /// The task bar.
    pub bar: PixelRect,
    /// Where the label text is anchored (left edge, baseline).
    pub label_x: f64,
    pub label_y: f64,
}

/// Compute the geometry of the row at `index`.
pub fn row_geometry(
    index: usize,
    row: &FlatRow<'_>,
    bounds: &Bounds,
    transform: &ViewTransform,
    metrics: &ChartMetrics,
) -> RowGeometry {
    let y = index as f64 * metrics.row_pitch() + metrics.header_offset;
    let x_start = date_to_x(row.task.start, bounds.min_date, transform, metrics.day_width);
    let x_end = date_to_x(row.task.end, bounds.min_date, transform, metrics.day_width);

    let bar = PixelRect::new(x_start, y, x_end - x_start, metrics.task_height);

    RowGeometry {
        bar: metrics.cell_grid.map_or(bar, |grid| grid.snap(bar)),
        label_x: x_start + metrics.label_inset + row.depth as f64 * metrics.indent_width,
        label_y: y + metrics.label_baseline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rgb, Task};
    use chrono::NaiveDate;

    fn day(month: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, month, d).unwrap()
    }

    #[test]
    fn test_metrics_defaults() {
        let metrics = ChartMetrics::default();
        assert_eq!(metrics.day_width, 20.0);
        assert_eq!(metrics.row_pitch(), 50.0);
        assert_eq!(metrics.cell_grid, None);
    }

    #[test]
    fn test_pixel_rect_contains_inclusive_edges() {
        let rect = PixelRect::new(10.0, 20.0, 30.0, 40.0);
        assert!(rect.contains(10.0, 20.0));
        assert!(rect.contains(40.0, 60.0));
        assert!(rect.contains(25.0, 30.0));
        assert!(!rect.contains(9.99, 30.0));
        assert!(!rect.contains(25.0, 60.01));
    }

    #[test]
    fn test_row_geometry_first_row() {
        let task = Task::new("t", "T", day(1, 1), day(1, 11), Rgb::new(0, 0, 0));
        let row = FlatRow {
            task: &task,
            depth: 0,
        };
        let bounds = Bounds {
            min_date: day(1, 1),
            max_date: day(1, 11),
        };

        let geometry = row_geometry(
            0,
            &row,
            &bounds,
            &ViewTransform::default(),
            &ChartMetrics::default(),
        );

        assert_eq!(geometry.bar, PixelRect::new(0.0, 40.0, 200.0, 40.0));
        assert_eq!(geometry.label_x, 5.0);
        assert_eq!(geometry.label_y, 65.0);
    }

    #[test]
    fn test_row_geometry_indents_label_by_depth() {
        let task = Task::new("t", "T", day(1, 3), day(1, 4), Rgb::new(0, 0, 0));
        let row = FlatRow {
            task: &task,
            depth: 2,
        };
        let bounds = Bounds {
            min_date: day(1, 1),
            max_date: day(1, 4),
        };
        let transform = ViewTransform {
            scale: 2.0,
            offset: 50.0,
        };

        let geometry = row_geometry(3, &row, &bounds, &transform, &ChartMetrics::default());

        // x = 2 days * 20 * 2 + 50
        assert_eq!(geometry.bar.x, 130.0);
        assert_eq!(geometry.bar.width, 40.0);
        assert_eq!(geometry.bar.y, 190.0);
        assert_eq!(geometry.label_x, 130.0 + 5.0 + 40.0);
    }

    #[test]
    fn test_cell_grid_span_covers_touched_cells() {
        let grid = CellGrid {
            width: 8.0,
            height: 16.0,
        };

        // x 4..20 touches cols 0..3, y 40..80 touches rows 2..5
        let (cols, rows) = grid.span(&PixelRect::new(4.0, 40.0, 16.0, 40.0));
        assert_eq!(cols, 0..3);
        assert_eq!(rows, 2..5);

        // An edge on a cell boundary does not spill into the next cell
        let (cols, _) = grid.span(&PixelRect::new(8.0, 0.0, 16.0, 16.0));
        assert_eq!(cols, 1..3);
    }

    #[test]
    fn test_cell_grid_span_of_zero_width_rect() {
        let grid = CellGrid {
            width: 8.0,
            height: 16.0,
        };
        let (cols, rows) = grid.span(&PixelRect::new(40.0, 90.0, 0.0, 40.0));
        assert_eq!(cols, 5..6);
        assert_eq!(rows, 5..9);
    }

    #[test]
    fn test_cell_grid_snap() {
        let grid = CellGrid {
            width: 8.0,
            height: 16.0,
        };
        let snapped = grid.snap(PixelRect::new(4.0, 40.0, 0.0, 40.0));
        assert_eq!(snapped, PixelRect::new(0.0, 32.0, 8.0, 48.0));
        assert_eq!(grid.snap(snapped), snapped);
    }

    #[test]
    fn test_row_geometry_snaps_bar_to_cell_grid() {
        let task = Task::new("t", "T", day(1, 1), day(1, 1), Rgb::new(0, 0, 0));
        let row = FlatRow {
            task: &task,
            depth: 0,
        };
        let bounds = Bounds {
            min_date: day(1, 1),
            max_date: day(1, 1),
        };
        let metrics = ChartMetrics {
            cell_grid: Some(CellGrid {
                width: 8.0,
                height: 16.0,
            }),
            ..ChartMetrics::default()
        };

        let geometry = row_geometry(0, &row, &bounds, &ViewTransform::default(), &metrics);

        // A one-day task still owns one column
        assert_eq!(geometry.bar, PixelRect::new(0.0, 32.0, 8.0, 48.0));
        assert_eq!(geometry.label_x, 5.0);
        assert_eq!(geometry.label_y, 65.0);
    }
}
