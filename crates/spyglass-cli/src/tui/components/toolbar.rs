//! Top toolbar
//!
//! Single-row header with the application name and the document title.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::tui::themes::Theme;
use crate::tui::utils::truncate_to_width;

pub fn render_toolbar(buf: &mut Buffer, area: Rect, title: &str, theme: &Theme) {
    if area.height == 0 {
        return;
    }

    let width = area.width as usize;
    let shown = truncate_to_width(title, width.saturating_sub(12));
    let line = Line::from(vec![
        Span::styled(
            " spyglass ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(theme.border)),
        Span::styled(shown, Style::default().fg(theme.title)),
    ])
    .style(Style::default().bg(theme.bg));

    line.render(area, buf);
}
