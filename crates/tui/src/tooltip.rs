//! Hover tooltip popup.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use hgantt_chart::TaskTooltip;

/// Where to place a tooltip of the given content next to the pointer.
///
/// The popup sits one cell below and right of the pointer and is shifted
/// back inside `bounds` when it would overflow.
pub fn tooltip_rect(bounds: Rect, pointer: (u16, u16), lines: &[String]) -> Rect {
    let content_width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0) as u16;
    let width = content_width.saturating_add(2).min(bounds.width);
    let height = (lines.len() as u16).saturating_add(2).min(bounds.height);

    let max_x = bounds.right().saturating_sub(width);
    let max_y = bounds.bottom().saturating_sub(height);
    let x = pointer.0.saturating_add(1).clamp(bounds.x, max_x.max(bounds.x));
    let y = pointer.1.saturating_add(1).clamp(bounds.y, max_y.max(bounds.y));

    Rect::new(x, y, width, height)
}

/// Draw the tooltip for a hovered task.
pub fn render_tooltip(frame: &mut Frame, bounds: Rect, pointer: (u16, u16), tooltip: &TaskTooltip) {
    let [name, start, end] = tooltip.lines();
    let area = tooltip_rect(bounds, pointer, &[name.clone(), start.clone(), end.clone()]);

    let text = vec![
        Line::from(Span::styled(
            name,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(start),
        Line::from(end),
    ];

    let popup = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
