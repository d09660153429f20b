//! Content pane scroll state
//!
//! Owns the document scroll position and bounds, plus the debounced
//! scrollbar visibility: the bar shows while scrolling and fades out once
//! scrolling has been idle for a moment.

use std::time::{Duration, Instant};

/// How long the scrollbar lingers after the last scroll activity
const SCROLLBAR_LINGER: Duration = Duration::from_millis(800);

#[derive(Debug)]
pub struct ScrollState {
    /// Current offset in rows; fractional while a smooth scroll is running
    offset: f64,
    /// Maximum scroll offset for bounds checking
    max_scroll: f64,
    /// Rows in the rendered document at the current width
    pub total_lines: usize,
    /// Rows the content pane can show
    pub viewport: usize,
    last_activity: Option<Instant>,
    scrollbar_shown: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            max_scroll: 0.0,
            total_lines: 0,
            viewport: 0,
            last_activity: None,
            scrollbar_shown: false,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// First visible row
    pub fn top_row(&self) -> usize {
        self.offset.round() as usize
    }

    pub fn max_scroll(&self) -> f64 {
        self.max_scroll
    }

    /// Update bounds after a re-render, clamping the current offset
    pub fn set_bounds(&mut self, total_lines: usize, viewport: usize) {
        self.total_lines = total_lines;
        self.viewport = viewport;
        self.max_scroll = total_lines.saturating_sub(viewport) as f64;
        self.offset = self.offset.clamp(0.0, self.max_scroll);
    }

    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.max_scroll);
    }

    pub fn scroll_by(&mut self, delta: f64, now: Instant) {
        self.set_offset(self.offset + delta);
        self.touch(now);
    }

    pub fn to_top(&mut self, now: Instant) {
        self.set_offset(0.0);
        self.touch(now);
    }

    pub fn to_end(&mut self, now: Instant) {
        self.set_offset(self.max_scroll);
        self.touch(now);
    }

    /// Record scroll activity; keeps the scrollbar visible
    pub fn touch(&mut self, now: Instant) {
        self.last_activity = Some(now);
        self.scrollbar_shown = true;
    }

    /// Fade the scrollbar once scrolling has been idle long enough.
    /// Returns true when visibility changed this tick.
    pub fn fade_tick(&mut self, now: Instant) -> bool {
        if !self.scrollbar_shown {
            return false;
        }
        let idle = self
            .last_activity
            .map_or(true, |last| now.duration_since(last) >= SCROLLBAR_LINGER);
        if idle {
            self.scrollbar_shown = false;
        }
        idle
    }

    pub fn scrollbar_visible(&self) -> bool {
        self.scrollbar_shown && self.max_scroll > 0.0
    }

    /// Scroll progress in percent, 100 when the document fits entirely
    pub fn percent(&self) -> u16 {
        if self.max_scroll <= 0.0 {
            return 100;
        }
        ((self.offset / self.max_scroll) * 100.0).round() as u16
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}
