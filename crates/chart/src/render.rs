//! Chart painting onto an abstract drawing surface.
//!
//! Every paint is a full repaint: the surface is cleared, then the date
//! header and gridlines, dependency connectors, and task bars with their
//! labels are drawn in that order.

use std::collections::HashMap;

use tracing::trace;

use crate::flatten::FlatRow;
use crate::layout::{ChartMetrics, PixelRect, RowGeometry, row_geometry};
use crate::model::Rgb;
use crate::timeline::{Bounds, ViewTransform, gridlines};

/// Colour of header and label text.
pub const TEXT_COLOR: Rgb = Rgb::new(0x33, 0x33, 0x33);
/// Colour of gridlines.
pub const GRID_COLOR: Rgb = Rgb::new(0xee, 0xee, 0xee);
/// Colour of dependency connectors.
pub const DEPENDENCY_COLOR: Rgb = Rgb::new(0x99, 0x99, 0x99);

/// Format of the gridline date labels.
pub const DATE_LABEL_FORMAT: &str = "%m/%d/%Y";

/// A 2D drawing target measured in pixels.
pub trait Surface {
    /// Width and height of the drawable area.
    fn size(&self) -> (f64, f64);

    /// Erase the whole surface.
    fn clear(&mut self);

    /// Fill a rectangle. Parts outside the surface are clipped.
    fn fill_rect(&mut self, rect: PixelRect, color: Rgb);

    /// Draw a straight line between two points.
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb);

    /// Draw text with its left edge at `x` and baseline at `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Rgb);
}

/// Paint the chart.
///
/// With no bounds or no rows the surface is only cleared. Rendering has no
/// side effects outside `surface`, so it may be called on every change.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    rows: &[FlatRow<'_>],
    bounds: Option<&Bounds>,
    transform: &ViewTransform,
    metrics: &ChartMetrics,
) {
    surface.clear();

    let Some(bounds) = bounds else {
        trace!("Skipping paint: no bounds");
        return;
    };
    if rows.is_empty() {
        trace!("Skipping paint: no rows");
        return;
    }

    let (_, height) = surface.size();

    let lines = gridlines(bounds, transform, metrics.day_width);
    for line in &lines {
        let label = line.date.format(DATE_LABEL_FORMAT).to_string();
        surface.fill_text(&label, line.x, metrics.header_baseline, TEXT_COLOR);
        surface.stroke_line((line.x, metrics.grid_top), (line.x, height), GRID_COLOR);
    }

    let geometries: Vec<RowGeometry> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| row_geometry(index, row, bounds, transform, metrics))
        .collect();

    draw_dependencies(surface, rows, &geometries);

    for (row, geometry) in rows.iter().zip(&geometries) {
        surface.fill_rect(geometry.bar, row.task.color);
        surface.fill_text(&row.task.name, geometry.label_x, geometry.label_y, TEXT_COLOR);
    }

    trace!(
        "Painted {} rows and {} gridlines at scale {} offset {}",
        rows.len(),
        lines.len(),
        transform.scale,
        transform.offset
    );
}

/// Connect each visible dependency's bar end to its dependent's bar start.
///
/// Dependencies that are not currently visible draw nothing.
fn draw_dependencies<S: Surface + ?Sized>(
    surface: &mut S,
    rows: &[FlatRow<'_>],
    geometries: &[RowGeometry],
) {
    let index_by_id: HashMap<&str, usize> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| (row.task.id.as_str(), index))
        .collect();

    for (row, geometry) in rows.iter().zip(geometries) {
        for dep_id in &row.task.dependencies {
            if let Some(&dep_index) = index_by_id.get(dep_id.as_str()) {
                let dep = &geometries[dep_index].bar;
                surface.stroke_line(
                    (dep.right(), dep.center_y()),
                    (geometry.bar.x, geometry.bar.center_y()),
                    DEPENDENCY_COLOR,
                );
            }
        }
    }
}

/// A recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        rect: PixelRect,
        color: Rgb,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgb,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        color: Rgb,
    },
}

/// A surface that records draw commands instead of rasterising them.
///
/// `clear` drops everything recorded so far, so after a paint the command
/// list describes exactly the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Rectangles painted in the current frame.
    pub fn bars(&self) -> Vec<(PixelRect, Rgb)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    /// Text painted in the current frame, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Lines of the given colour painted in the current frame.
    pub fn lines_with_color(&self, wanted: Rgb) -> Vec<((f64, f64), (f64, f64))> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Line { from, to, color } if *color == wanted => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }
}
