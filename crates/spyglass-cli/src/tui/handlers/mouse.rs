//! Mouse handling
//!
//! Wheel scrolling routed by hit-tested area, outline clicks, and
//! scrollbar click/drag via the cached layout rects.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::tui::app::{App, Focus};
use crate::tui::state::{DragTarget, ScrollbarDrag};

/// Rows per wheel notch
const WHEEL_STEP: f64 = 3.0;

impl App {
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.handle_wheel(mouse.column, mouse.row, WHEEL_STEP),
            MouseEventKind::ScrollUp => self.handle_wheel(mouse.column, mouse.row, -WHEEL_STEP),
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_left_click(mouse.column, mouse.row);
            }
            MouseEventKind::Drag(MouseButton::Left) => self.handle_drag(mouse.row),
            MouseEventKind::Up(MouseButton::Left) => {
                self.layout.dragging_scrollbar = None;
            }
            _ => {}
        }
    }

    fn handle_wheel(&mut self, x: u16, y: u16, delta: f64) {
        let pos = Position::new(x, y);

        if let Some(area) = self.layout.sidebar_area {
            if area.contains(pos) {
                self.sidebar.manual_scroll(delta);
                return;
            }
        }

        self.scroll_content_by(delta);
    }

    fn handle_left_click(&mut self, x: u16, y: u16) {
        let pos = Position::new(x, y);

        // Scrollbar tracks take precedence over the panes behind them
        if let Some(track) = self.layout.sidebar_scrollbar_area {
            if track.contains(pos) {
                self.sidebar.handle_scrollbar_click(y, track);
                self.layout.dragging_scrollbar = Some(DragTarget::Sidebar(ScrollbarDrag::new(
                    y,
                    self.sidebar.scroll_offset(),
                    track,
                    self.sidebar.max_scroll(),
                )));
                return;
            }
        }

        if let Some(track) = self.layout.content_scrollbar_area {
            if track.contains(pos) && self.scroll.scrollbar_visible() {
                let max = self.scroll.max_scroll();
                let relative = y.saturating_sub(track.y) as f64;
                let offset = (relative / track.height.max(1) as f64 * max).round();
                self.scroll_content_to(offset);
                self.layout.dragging_scrollbar = Some(DragTarget::Content(ScrollbarDrag::new(
                    y,
                    self.scroll.offset(),
                    track,
                    max,
                )));
                return;
            }
        }

        if let Some(area) = self.layout.sidebar_area {
            if area.contains(pos) {
                self.focus = Focus::Outline;
                if let Some(entry) = self.sidebar.entry_at(area, y) {
                    self.sidebar.select(entry);
                    self.activate_entry(entry);
                }
                return;
            }
        }

        if let Some(area) = self.layout.content_area {
            if area.contains(pos) {
                self.focus = Focus::Content;
                let row = self.scroll.top_row() + (y - area.y) as usize;
                self.cursor_line = (row < self.scroll.total_lines).then_some(row);
            }
        }
    }

    fn handle_drag(&mut self, y: u16) {
        match self.layout.dragging_scrollbar {
            Some(DragTarget::Content(drag)) => {
                self.scroll_content_to(drag.calculate_offset(y));
            }
            Some(DragTarget::Sidebar(drag)) => {
                self.sidebar.set_scroll(drag.calculate_offset(y));
            }
            None => {}
        }
    }
}
