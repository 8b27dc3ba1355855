//! Hierarchy panel listing the visible tasks.
//!
//! Walks the forest on its own, honouring the same expanded set as the
//! chart, so the panel lists exactly the rows the chart paints in the same
//! order. Groups get an expand/collapse chevron and every task a colour
//! swatch.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use hgantt_chart::{ExpandedSet, Rgb, Task};

/// Visual prefix characters for tree nodes.
mod prefix {
    /// Prefix for collapsed groups.
    pub const COLLAPSED: &str = "\u{25B8}"; // ▸
    /// Prefix for expanded groups.
    pub const EXPANDED: &str = "\u{25BE}"; // ▾
    /// Prefix for leaf tasks.
    pub const LEAF: &str = " ";
}

/// Swatch drawn in the task colour before the name.
const SWATCH: &str = "\u{25A0}"; // ■

/// Convert a chart colour to a terminal colour.
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Render the hierarchy panel.
pub fn render_nav_panel(
    frame: &mut Frame,
    area: Rect,
    forest: &[Task],
    expanded: &ExpandedSet,
    selected_index: usize,
    hovered_id: Option<&str>,
) {
    let block = Block::default()
        .title(" Tasks ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if forest.is_empty() {
        let paragraph = Paragraph::new("No tasks")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    let lines = build_nav_lines(forest, expanded, selected_index, hovered_id);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Per-render styling inputs.
struct LineContext<'a> {
    expanded: &'a ExpandedSet,
    selected_index: usize,
    hovered_id: Option<&'a str>,
}

/// Build one styled line per visible task.
pub fn build_nav_lines(
    forest: &[Task],
    expanded: &ExpandedSet,
    selected_index: usize,
    hovered_id: Option<&str>,
) -> Vec<Line<'static>> {
    let ctx = LineContext {
        expanded,
        selected_index,
        hovered_id,
    };
    let mut lines = Vec::new();
    for root in forest {
        build_task_lines(&mut lines, root, 0, &ctx);
    }
    lines
}

/// Recursively push a task's line and, when expanded, its children's.
fn build_task_lines(
    lines: &mut Vec<Line<'static>>,
    task: &Task,
    depth: usize,
    ctx: &LineContext<'_>,
) {
    let is_open = task.has_children() && ctx.expanded.contains(&task.id);
    let is_selected = lines.len() == ctx.selected_index;
    let is_hovered = ctx.hovered_id == Some(task.id.as_str());

    lines.push(render_task_line(task, depth, is_open, is_selected, is_hovered));

    if is_open {
        for child in &task.children {
            build_task_lines(lines, child, depth + 1, ctx);
        }
    }
}

fn render_task_line(
    task: &Task,
    depth: usize,
    is_open: bool,
    is_selected: bool,
    is_hovered: bool,
) -> Line<'static> {
    let indent = "  ".repeat(depth);
    let marker = if !task.has_children() {
        prefix::LEAF
    } else if is_open {
        prefix::EXPANDED
    } else {
        prefix::COLLAPSED
    };

    let mut style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
            .bg(Color::DarkGray)
    } else if task.has_children() {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default().fg(Color::White)
    };
    if is_hovered {
        style = style.add_modifier(Modifier::UNDERLINED);
    }

    Line::from(vec![
        Span::styled(format!("{indent}{marker} "), style),
        Span::styled(SWATCH, Style::default().fg(to_color(task.color))),
        Span::styled(format!(" {}", task.name), style),
    ])
}
