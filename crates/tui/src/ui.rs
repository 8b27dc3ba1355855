//! UI rendering for the TUI.
//!
//! Provides layout and widget rendering using ratatui.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use crate::app::App;
use crate::chart_view::{chart_inner, render_chart_view};
use crate::navigation::render_nav_panel;
use crate::tooltip::render_tooltip;

/// Legend text for keyboard shortcuts.
const LEGEND: &str = " [j/k] Select  [Enter] Toggle  [+/-] Zoom  [h/l] Pan  [E/C] Expand/Collapse all  [0] Reset  [q] Quit ";

/// Draw the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = create_main_layout(frame.area());
    let controller = app.controller();
    let hovered = controller.hovered_task().map(|task| task.id.as_str());

    render_nav_panel(
        frame,
        chunks[0],
        controller.forest(),
        controller.expanded(),
        app.selected_index(),
        hovered,
    );
    render_chart_view(frame, chunks[1], controller, app.cell());
    draw_legend(frame, chunks[2]);

    if let (Some(tooltip), Some(pointer)) = (controller.tooltip(), app.pointer_cell()) {
        render_tooltip(frame, chunks[1], pointer, &tooltip);
    }
}

/// The painted chart region for a terminal of the given size.
pub fn chart_area(area: Rect) -> Rect {
    create_main_layout(area)
        .get(1)
        .map(|&panel| chart_inner(panel))
        .unwrap_or_default()
}

/// Create the main three-part layout: hierarchy panel, chart, legend.
fn create_main_layout(area: Rect) -> Vec<Rect> {
    let [main, legend] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .areas(area);

    let [nav, chart] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .areas(main);

    vec![nav, chart, legend]
}

/// Draw the legend bar at the bottom.
fn draw_legend(frame: &mut Frame, area: Rect) {
    let legend = Paragraph::new(LEGEND).style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(legend, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::to_color;
    use crate::surface::CellSize;
    use chrono::NaiveDate;
    use hgantt_chart::{Action, Controller, ExpandedSet, Rgb, Task, sample_forest};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    fn sample_app() -> App {
        let forest = sample_forest();
        let expanded = ExpandedSet::with_roots(&forest);
        App::new(Controller::new(forest, expanded), CellSize::default())
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    /// Draw `app` and point at every chart cell: a cell with a bar
    /// background hovers a task of that colour, any other cell hovers
    /// nothing.
    fn assert_painted_cells_hover_their_bar(mut app: App, width: u16, height: u16) {
        app.handle_resize(width, height);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();
        let buffer = terminal.backend().buffer().clone();

        let chart = app.chart_area();
        let mut painted = 0;
        for y in chart.top()..chart.bottom() {
            for x in chart.left()..chart.right() {
                app.pointer_at(x, y);
                let hovered = app.controller().hovered_task().map(|task| to_color(task.color));

                match buffer[(x, y)].bg {
                    bg @ Color::Rgb(..) => {
                        painted += 1;
                        assert_eq!(hovered, Some(bg), "cell ({x}, {y})");
                    }
                    _ => assert_eq!(hovered, None, "cell ({x}, {y})"),
                }
            }
        }
        assert!(painted > 0);
    }

    #[test]
    fn test_legend_not_empty() {
        assert!(!LEGEND.is_empty());
    }

    #[test]
    fn test_create_main_layout_produces_three_chunks() {
        let chunks = create_main_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(chunks.len(), 3, "Expected 3 chunks: nav, chart, legend");
        assert_eq!(chunks[2].height, 1);
        assert_eq!(chunks[0].width + chunks[1].width, 80);
    }

    #[test]
    fn test_create_main_layout_small_terminal() {
        let chunks = create_main_layout(Rect::new(0, 0, 10, 2));
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn test_chart_area_is_inside_right_panel() {
        let area = chart_area(Rect::new(0, 0, 120, 40));
        assert_eq!(area, Rect::new(31, 1, 88, 37));
    }

    #[test]
    fn test_draw_full_frame() {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = sample_app();

        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        assert!(row_text(buffer, 0).contains("Tasks"));
        assert!(row_text(buffer, 0).contains("Chart"));
        assert!(row_text(buffer, 1).contains("Project A"));
        assert!(row_text(buffer, 29).contains("[q] Quit"));
    }

    #[test]
    fn test_draw_tooltip_when_hovering() {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = sample_app();
        app.handle_resize(120, 30);

        // Centre of the cell over Project A's bar
        let chart = app.chart_area();
        app.pointer_at(chart.x, chart.y + 3);
        assert_eq!(
            app.controller().hovered_task().map(|task| task.name.as_str()),
            Some("Project A")
        );

        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let found = (0..30).any(|y| row_text(buffer, y).contains("Start: 01/01/2023"));
        assert!(found);
    }

    #[test]
    fn test_every_painted_cell_hovers_its_bar() {
        assert_painted_cells_hover_their_bar(sample_app(), 120, 40);
    }

    #[test]
    fn test_every_painted_cell_hovers_its_bar_after_zoom_and_pan() {
        let mut app = sample_app();
        app.apply(Action::ZoomIn);
        app.apply(Action::PanRight);
        app.apply(Action::ExpandAll);
        assert_painted_cells_hover_their_bar(app, 120, 40);
    }

    #[test]
    fn test_one_day_task_is_hoverable() {
        let forest = vec![
            Task::new("long", "Long", day(1), day(20), Rgb::new(200, 0, 0)),
            Task::new("short", "Short", day(3), day(3), Rgb::new(0, 200, 0)),
            Task::new("late", "Late", day(10), day(12), Rgb::new(0, 0, 200)),
        ];
        let app = App::new(
            Controller::new(forest, ExpandedSet::new()),
            CellSize::default(),
        );
        assert_painted_cells_hover_their_bar(app, 80, 20);
    }
}
