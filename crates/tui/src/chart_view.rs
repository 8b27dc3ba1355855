//! Chart panel: a bordered block whose interior is painted by the chart core.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use hgantt_chart::Controller;

use crate::surface::{CellSize, TerminalSurface};

/// Block surrounding the chart, titled with the current zoom and pan.
fn chart_block(controller: &Controller) -> Block<'static> {
    let transform = controller.transform();
    Block::default()
        .title(format!(
            " Chart  zoom {:.2}x  offset {:+.0}px ",
            transform.scale, transform.offset
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

/// Area available for painting inside a chart panel.
pub fn chart_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// Render the chart panel.
pub fn render_chart_view(frame: &mut Frame, area: Rect, controller: &Controller, cell: CellSize) {
    let block = chart_block(controller);

    if controller.forest().is_empty() {
        let paragraph = Paragraph::new("No tasks to chart")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut surface = TerminalSurface::new(frame.buffer_mut(), inner, cell);
    controller.render(&mut surface);
}
