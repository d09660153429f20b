//! Outline sidebar component
//!
//! The rendered half of the navigator: one row per entry with depth-2 rows
//! indented under their group, a sliding marker aligned to the active
//! subsection, active and dual-active highlighting, and an own scroll
//! container that only moves enough to keep the active group visible.
//!
//! Rows map one-to-one onto entries, so row index == entry index and every
//! row is one unit tall in the navigator's scroll space.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use spyglass_core::{Activation, EntryDepth, NavWidget, Navigator};

use super::scrollbars::render_scrollbar;
use crate::tui::themes::Theme;
use crate::tui::utils::truncate_to_width;

/// Sidebar width when shown
pub const SIDEBAR_WIDTH: u16 = 32;

/// Minimum terminal width to show the sidebar
pub const MIN_TERMINAL_WIDTH: u16 = 72;

/// Horizontal padding inside the content area
const PAD_X: u16 = 1;

/// Fraction of the remaining distance covered per animation tick
const GLIDE_STEP: f64 = 0.35;

/// Distance below which a glide snaps to its target
const GLIDE_SNAP: f64 = 0.05;

/// Marker glyph in the depth-2 gutter
const MARKER_GLYPH: char = '▍';

/// Result of rendering the sidebar
pub struct SidebarRenderResult {
    /// Scrollbar track area for hit testing (when scrolling is possible)
    pub scrollbar_area: Option<Rect>,
}

/// Sliding marker for the active group
#[derive(Debug, Clone, Copy)]
struct MarkerState {
    group: usize,
    top: f64,
    target_top: f64,
}

/// Sidebar widget state
#[derive(Debug, Default)]
pub struct OutlineSidebarState {
    /// One row per entry
    total_rows: usize,
    /// Rows the list can show (set during render)
    viewport: usize,
    /// Animated scroll offset of the list
    scroll: f64,
    scroll_target: f64,
    marker: Option<MarkerState>,
    /// Keyboard cursor when the sidebar has focus
    pub selected: usize,
}

impl OutlineSidebarState {
    pub fn new(total_rows: usize) -> Self {
        Self {
            total_rows,
            ..Self::default()
        }
    }

    pub fn set_viewport(&mut self, rows: usize) {
        self.viewport = rows;
        let max = self.max_scroll();
        self.scroll = self.scroll.clamp(0.0, max);
        self.scroll_target = self.scroll_target.clamp(0.0, max);
    }

    pub fn max_scroll(&self) -> f64 {
        self.total_rows.saturating_sub(self.viewport) as f64
    }

    /// First visible row
    pub fn top_row(&self) -> usize {
        self.scroll.round() as usize
    }

    /// Take over marker placement and nav scrolling from an activation.
    /// The marker slides within its group and snaps when the group changes.
    pub fn apply_activation(&mut self, activation: &Activation) {
        self.marker = activation.marker.map(|placement| match self.marker {
            Some(state) if state.group == placement.group => MarkerState {
                group: placement.group,
                top: state.top,
                target_top: placement.top,
            },
            _ => MarkerState {
                group: placement.group,
                top: placement.top,
                target_top: placement.top,
            },
        });
        if let Some(offset) = activation.nav_scroll {
            self.scroll_target = offset.clamp(0.0, self.max_scroll());
        }
    }

    /// Glide the list to its end (bottom-of-document rule)
    pub fn scroll_to_end(&mut self) {
        self.scroll_target = self.max_scroll();
    }

    /// Immediate scroll from the user's wheel; no glide
    pub fn manual_scroll(&mut self, delta: f64) {
        let max = self.max_scroll();
        self.scroll_target = (self.scroll_target + delta).clamp(0.0, max);
        self.scroll = self.scroll_target;
    }

    /// Jump to a clicked position on the scrollbar track
    pub fn handle_scrollbar_click(&mut self, click_y: u16, area: Rect) {
        let max = self.max_scroll();
        if max <= 0.0 || area.height == 0 {
            return;
        }
        let relative = click_y.saturating_sub(area.y) as f64;
        let offset = (relative / area.height as f64 * max).round().clamp(0.0, max);
        self.scroll = offset;
        self.scroll_target = offset;
    }

    pub fn set_scroll(&mut self, offset: f64) {
        let max = self.max_scroll();
        self.scroll = offset.clamp(0.0, max);
        self.scroll_target = self.scroll;
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    /// Entry under a click at `(y)` within the rendered sidebar `area`
    pub fn entry_at(&self, area: Rect, y: u16) -> Option<usize> {
        // Top and bottom border rows are dead
        if y <= area.y || y + 1 >= area.y + area.height {
            return None;
        }
        let row = self.top_row() + (y - area.y - 1) as usize;
        (row < self.total_rows).then_some(row)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.total_rows {
            self.selected += 1;
            self.ensure_selected_visible();
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.ensure_selected_visible();
        }
    }

    pub fn select(&mut self, entry: usize) {
        if entry < self.total_rows {
            self.selected = entry;
            self.ensure_selected_visible();
        }
    }

    fn ensure_selected_visible(&mut self) {
        let selected = self.selected as f64;
        let visible = self.viewport.max(1) as f64;
        if selected < self.scroll_target {
            self.scroll_target = selected;
        } else if selected + 1.0 > self.scroll_target + visible {
            self.scroll_target = selected + 1.0 - visible;
        }
    }

    /// Advance the marker and scroll glides. Returns true while anything
    /// is still moving (the caller keeps redrawing).
    pub fn tick(&mut self) -> bool {
        let mut animating = glide(&mut self.scroll, self.scroll_target);
        if let Some(marker) = self.marker.as_mut() {
            animating |= glide(&mut marker.top, marker.target_top);
        }
        animating
    }

    fn marker_row(&self) -> Option<usize> {
        self.marker.map(|marker| marker.top.round() as usize)
    }
}

impl NavWidget for OutlineSidebarState {
    fn entry_bounds(&self, entry: usize) -> Option<(f64, f64)> {
        (entry < self.total_rows).then(|| (entry as f64, 1.0))
    }

    fn scroll_viewport(&self) -> (f64, f64) {
        // The glide target, so pending motion composes with new requests
        (self.scroll_target, self.viewport.max(1) as f64)
    }
}

fn glide(current: &mut f64, target: f64) -> bool {
    let remaining = target - *current;
    if remaining == 0.0 {
        return false;
    }
    if remaining.abs() <= GLIDE_SNAP {
        *current = target;
    } else {
        *current += remaining * GLIDE_STEP;
    }
    true
}

/// Render the sidebar; returns the scrollbar area for hit testing
pub fn render_outline_sidebar(
    buf: &mut Buffer,
    area: Rect,
    navigator: &Navigator,
    state: &mut OutlineSidebarState,
    focused: bool,
    theme: &Theme,
) -> SidebarRenderResult {
    if area.width < 8 || area.height < 3 {
        return SidebarRenderResult {
            scrollbar_area: None,
        };
    }

    let block = Block::default()
        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(" Contents ")
        .title_style(Style::default().fg(theme.title))
        .style(Style::default().bg(theme.bg));

    let inner = block.inner(area);
    block.render(area, buf);

    state.set_viewport(inner.height as usize);

    // Scrollbar column stays reserved to avoid reflow jitter
    let content_width = inner.width.saturating_sub(1);
    let label_budget = content_width.saturating_sub(PAD_X * 2) as usize;
    let entries = navigator.entries();
    let activation = navigator.activation();
    let marker_row = state.marker_row();

    let start = state.top_row();
    let end = (start + inner.height as usize).min(state.total_rows);

    for (slot, row) in (start..end).enumerate() {
        let Some(entry) = entries.get(row) else {
            continue;
        };
        let y = inner.y + slot as u16;
        let current = activation.is_current(row);
        let styled = activation.is_styled(row);

        let line = match entry.depth {
            EntryDepth::One => {
                let style = if current {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
                };
                let label = truncate_to_width(&entry.label, label_budget);
                Line::from(Span::styled(label, style))
            }
            EntryDepth::Two => {
                let marker_here = marker_row == Some(row);
                let marker_span = if marker_here {
                    Span::styled(
                        MARKER_GLYPH.to_string(),
                        Style::default().fg(theme.accent),
                    )
                } else {
                    Span::raw(" ")
                };
                let style = if current {
                    Style::default().fg(theme.accent)
                } else if styled {
                    Style::default().fg(theme.sub_heading)
                } else {
                    Style::default().fg(theme.dim)
                };
                let label = truncate_to_width(&entry.label, label_budget.saturating_sub(3));
                Line::from(vec![
                    Span::raw(" "),
                    marker_span,
                    Span::raw(" "),
                    Span::styled(label, style),
                ])
            }
        };

        let mut line = line;
        if focused && state.selected == row {
            line = line.style(
                Style::default()
                    .bg(theme.selection_bg)
                    .fg(theme.selection_fg),
            );
        }

        buf.set_line(inner.x + PAD_X, y, &line, content_width.saturating_sub(PAD_X));
    }

    let scrollbar_area = if state.total_rows > inner.height as usize {
        let track = Rect::new(inner.x + inner.width - 1, inner.y, 1, inner.height);
        render_scrollbar(
            buf,
            track,
            state.top_row(),
            state.total_rows,
            inner.height as usize,
            theme.scrollbar_thumb,
            theme.scrollbar_track,
        );
        Some(track)
    } else {
        None
    };

    SidebarRenderResult { scrollbar_area }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spyglass_core::MarkerPlacement;

    fn activation(marker: Option<MarkerPlacement>, nav_scroll: Option<f64>) -> Activation {
        Activation {
            entry: 0,
            parent: None,
            styled_child: None,
            marker,
            nav_scroll,
        }
    }

    fn placement(group: usize, top: f64) -> MarkerPlacement {
        MarkerPlacement {
            group,
            top,
            height: 1.0,
        }
    }

    #[test]
    fn test_entry_bounds_are_one_row_per_entry() {
        let state = OutlineSidebarState::new(5);
        assert_eq!(state.entry_bounds(3), Some((3.0, 1.0)));
        assert_eq!(state.entry_bounds(5), None);
    }

    #[test]
    fn test_marker_slides_within_group_and_snaps_across_groups() {
        let mut state = OutlineSidebarState::new(10);
        state.set_viewport(10);

        state.apply_activation(&activation(Some(placement(0, 1.0)), None));
        assert_eq!(state.marker_row(), Some(1));

        // Same group: target moves, current position glides
        state.apply_activation(&activation(Some(placement(0, 4.0)), None));
        assert_eq!(state.marker_row(), Some(1));
        while state.tick() {}
        assert_eq!(state.marker_row(), Some(4));

        // New group: marker appears in place, no glide from the old spot
        state.apply_activation(&activation(Some(placement(6, 7.0)), None));
        assert_eq!(state.marker_row(), Some(7));

        // No marker: hidden
        state.apply_activation(&activation(None, None));
        assert_eq!(state.marker_row(), None);
    }

    #[test]
    fn test_nav_scroll_glides_to_requested_offset() {
        let mut state = OutlineSidebarState::new(30);
        state.set_viewport(10);

        state.apply_activation(&activation(None, Some(12.0)));
        assert_eq!(state.top_row(), 0);
        while state.tick() {}
        assert_eq!(state.top_row(), 12);
    }

    #[test]
    fn test_scroll_to_end_clamps_to_bounds() {
        let mut state = OutlineSidebarState::new(30);
        state.set_viewport(10);
        state.scroll_to_end();
        while state.tick() {}
        assert_eq!(state.top_row(), 20);

        // Everything fits: end is the top
        let mut small = OutlineSidebarState::new(5);
        small.set_viewport(10);
        small.scroll_to_end();
        assert!(!small.tick());
        assert_eq!(small.top_row(), 0);
    }

    #[test]
    fn test_entry_at_maps_clicks_through_the_border() {
        let mut state = OutlineSidebarState::new(20);
        state.set_viewport(8);
        let area = Rect::new(40, 2, 32, 10);

        // Border rows hit nothing
        assert_eq!(state.entry_at(area, 2), None);
        assert_eq!(state.entry_at(area, 11), None);

        assert_eq!(state.entry_at(area, 3), Some(0));
        assert_eq!(state.entry_at(area, 7), Some(4));

        state.set_scroll(5.0);
        assert_eq!(state.entry_at(area, 3), Some(5));
    }

    #[test]
    fn test_keyboard_selection_keeps_cursor_visible() {
        let mut state = OutlineSidebarState::new(20);
        state.set_viewport(5);

        for _ in 0..7 {
            state.select_next();
        }
        assert_eq!(state.selected, 7);
        while state.tick() {}
        // Row 7 must be within [top, top+5)
        let top = state.top_row();
        assert!((top..top + 5).contains(&state.selected));

        for _ in 0..7 {
            state.select_prev();
        }
        while state.tick() {}
        assert_eq!(state.selected, 0);
        assert_eq!(state.top_row(), 0);
    }

    #[test]
    fn test_scrollbar_click_jumps_proportionally() {
        let mut state = OutlineSidebarState::new(40);
        state.set_viewport(10);
        let track = Rect::new(70, 3, 1, 10);

        state.handle_scrollbar_click(3, track);
        assert_eq!(state.top_row(), 0);
        state.handle_scrollbar_click(13, track);
        assert_eq!(state.top_row(), 30);
        state.handle_scrollbar_click(8, track);
        assert_eq!(state.top_row(), 15);
    }
}
