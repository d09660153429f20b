//! Bottom status bar
//!
//! Shows the active section trail, scroll progress, and the key hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::themes::Theme;
use crate::tui::utils::truncate_to_width;

const HINTS: &str = "j/k scroll · tab outline · q quit";

pub fn render_status_bar(
    buf: &mut Buffer,
    area: Rect,
    trail: &str,
    percent: u16,
    theme: &Theme,
) {
    if area.height == 0 {
        return;
    }

    let width = area.width as usize;
    let right = format!("{HINTS} · {percent:>3}% ");
    let right_width = right.width();

    let trail_budget = width.saturating_sub(right_width + 2);
    let shown_trail = truncate_to_width(trail, trail_budget);
    let gap = width
        .saturating_sub(1 + shown_trail.width() + right_width)
        .max(1);

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(shown_trail, Style::default().fg(theme.accent)),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, Style::default().fg(theme.dim)),
    ])
    .style(Style::default().bg(theme.bg));

    line.render(area, buf);
}
