//! Terminal front end for hgantt.
//!
//! Draws the hierarchy panel and the Gantt chart with ratatui and feeds
//! crossterm key, mouse and resize events to the chart controller.

pub mod app;
pub mod chart_view;
pub mod error;
pub mod event;
pub mod navigation;
pub mod surface;
pub mod tooltip;
pub mod ui;

pub use app::App;
pub use error::{TuiError, TuiResult};
pub use surface::{CellSize, TerminalSurface};
