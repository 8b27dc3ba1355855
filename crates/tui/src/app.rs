//! Main application state and event loop.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::prelude::*;
use tracing::{debug, info};

use hgantt_chart::{Action, ChartMetrics, Controller, FlatRow};

use crate::error::TuiResult;
use crate::event::{
    is_collapse_all, is_down, is_expand_all, is_pan_left, is_pan_right, is_quit, is_reset_view,
    is_toggle, is_up, is_zoom_in, is_zoom_out, poll_event,
};
use crate::surface::CellSize;
use crate::ui;

/// Main application state.
pub struct App {
    /// Chart state and interaction logic.
    controller: Controller,
    /// Index of the selected row in the hierarchy panel.
    selected_index: usize,
    /// Whether the application is still running.
    running: bool,
    /// Pixel size of a terminal cell.
    cell: CellSize,
    /// Painted chart region in terminal cells.
    chart_area: Rect,
    /// Terminal cell under the mouse while it is over the chart.
    pointer_cell: Option<(u16, u16)>,
}

impl App {
    /// Create a new App around an initialised controller.
    ///
    /// The controller's bars are snapped to the terminal cells, so every
    /// painted cell is hoverable.
    pub fn new(controller: Controller, cell: CellSize) -> Self {
        let metrics = ChartMetrics {
            cell_grid: Some(cell.grid()),
            ..*controller.metrics()
        };
        Self {
            controller: controller.with_metrics(metrics),
            selected_index: 0,
            running: true,
            cell,
            chart_area: Rect::default(),
            pointer_cell: None,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Get the currently selected row index.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Check if the application is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn cell(&self) -> CellSize {
        self.cell
    }

    /// The chart region as of the last resize.
    pub fn chart_area(&self) -> Rect {
        self.chart_area
    }

    /// Terminal cell under the pointer, when it is over the chart.
    pub fn pointer_cell(&self) -> Option<(u16, u16)> {
        self.pointer_cell
    }

    /// Get the currently selected row, if any.
    pub fn selected_row(&self) -> Option<FlatRow<'_>> {
        self.controller.rows().get(self.selected_index).copied()
    }

    /// Request the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Move selection down. Clamps to the last row.
    pub fn select_next(&mut self) {
        let max_items = self.controller.rows().len();
        if max_items > 0 && self.selected_index < max_items - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up. Clamps to the first row.
    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Toggle expand/collapse on the selected row.
    ///
    /// Only affects groups.
    pub fn toggle_selected(&mut self) {
        let id = match self.selected_row() {
            Some(row) if row.task.has_children() => row.task.id.clone(),
            _ => return,
        };
        self.apply(Action::Toggle(id));
    }

    /// Apply an action and keep the selection on a visible row.
    pub fn apply(&mut self, action: Action) {
        self.controller.apply(action);
        let rows = self.controller.rows().len();
        if rows == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= rows {
            self.selected_index = rows - 1;
        }
    }

    /// Handle a terminal size change.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.chart_area = ui::chart_area(Rect::new(0, 0, width, height));
        let (px_width, px_height) = self.cell.pixels(self.chart_area);
        debug!(
            "Resized to {}x{} cells, chart {}x{} px",
            width, height, px_width, px_height
        );
        self.apply(Action::Resize {
            width: px_width,
            height: px_height,
        });
    }

    /// Move the pointer to an absolute terminal cell.
    ///
    /// Inside the chart this hovers the bar painted in the cell; outside it
    /// the pointer leaves the chart.
    pub fn pointer_at(&mut self, col: u16, row: u16) {
        match self.chart_pixel(col, row) {
            Some((x, y)) => {
                self.pointer_cell = Some((col, row));
                self.apply(Action::PointerMove { x, y });
            }
            None => {
                if self.pointer_cell.take().is_some() {
                    self.apply(Action::PointerLeave);
                }
            }
        }
    }

    /// Click at an absolute terminal cell, toggling a group bar under it.
    pub fn click_at(&mut self, col: u16, row: u16) {
        let Some((x, y)) = self.chart_pixel(col, row) else {
            return;
        };

        let hit = self.controller.row_at(x, y).map(|row| row.task.id.clone());
        if let Some(id) = hit {
            if let Some(index) = self
                .controller
                .rows()
                .iter()
                .position(|row| row.task.id == id)
            {
                self.selected_index = index;
            }
            self.toggle_selected();
        }
        self.pointer_at(col, row);
    }

    /// Chart-local pixel position of the centre of an absolute cell.
    fn chart_pixel(&self, col: u16, row: u16) -> Option<(f64, f64)> {
        let area = self.chart_area;
        if !area.contains(Position::new(col, row)) {
            return None;
        }
        Some(self.cell.cell_center(col - area.x, row - area.y))
    }

    /// Run the main application loop.
    ///
    /// This initializes the terminal, runs the event loop, and ensures
    /// the terminal is restored on exit (even on panic).
    pub fn run(&mut self) -> TuiResult<()> {
        let mut terminal = init_terminal()?;

        // Restore the terminal even if the loop panics
        let _guard = scopeguard::guard((), |()| {
            let _ = restore_terminal();
        });

        let size = terminal.size()?;
        self.handle_resize(size.width, size.height);
        info!("Started with {} visible rows", self.controller.rows().len());

        let result = self.event_loop(&mut terminal);

        drop(_guard);

        result
    }

    /// The main event loop.
    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> TuiResult<()> {
        while self.running {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if let Some(event) = poll_event(Duration::from_millis(100))? {
                self.handle_event(&event);
            }
        }
        Ok(())
    }

    /// Dispatch a terminal event.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.handle_resize(*width, *height),
            _ => {}
        }
    }

    /// Handle a keyboard event.
    fn handle_key(&mut self, key: &KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if is_quit(key) {
            self.quit();
        } else if is_down(key) {
            self.select_next();
        } else if is_up(key) {
            self.select_previous();
        } else if is_toggle(key) {
            self.toggle_selected();
        } else if is_zoom_in(key) {
            self.apply(Action::ZoomIn);
        } else if is_zoom_out(key) {
            self.apply(Action::ZoomOut);
        } else if is_pan_left(key) {
            self.apply(Action::PanLeft);
        } else if is_pan_right(key) {
            self.apply(Action::PanRight);
        } else if is_expand_all(key) {
            self.apply(Action::ExpandAll);
        } else if is_collapse_all(key) {
            self.apply(Action::CollapseAll);
        } else if is_reset_view(key) {
            self.apply(Action::ResetView);
        }
    }

    /// Handle a mouse event.
    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer_at(mouse.column, mouse.row);
            }
            MouseEventKind::Down(MouseButton::Left) => self.click_at(mouse.column, mouse.row),
            MouseEventKind::ScrollUp => self.apply(Action::ZoomIn),
            MouseEventKind::ScrollDown => self.apply(Action::ZoomOut),
            _ => {}
        }
    }
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> TuiResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> TuiResult<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}
