//! Core of the hgantt hierarchical Gantt chart.
//!
//! The pipeline is synchronous and recomputed on every change:
//! the [`Controller`] holds the state, [`flatten`] turns the forest into
//! visible rows, [`compute_bounds`] and [`date_to_x`] map dates to pixels,
//! and [`render()`] paints onto any [`Surface`]. Hit-testing reuses the
//! same row geometry as painting.

pub mod controller;
pub mod error;
pub mod flatten;
pub mod layout;
pub mod model;
pub mod render;
pub mod timeline;

pub use controller::{Action, Controller, DEFAULT_PAN_STEP, Viewport};
pub use error::{ChartError, ChartResult};
pub use flatten::{ExpandedSet, FlatRow, flatten};
pub use hit_test::{TaskTooltip, hit_test};
pub use layout::{CellGrid, ChartMetrics, PixelRect, RowGeometry, row_geometry};
pub use model::{Rgb, Task, load_forest, parse_forest, sample_forest};
pub use render::{DrawCommand, RecordingSurface, Surface, render};
pub use timeline::{
    Bounds, GridLine, MAX_SCALE, MIN_SCALE, ViewTransform, ZOOM_FACTOR, compute_bounds,
    date_to_x, gridlines,
};
