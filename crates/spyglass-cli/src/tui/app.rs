//! Main viewer application
//!
//! Application state and the event loop. Input handling lives in the
//! handlers/ module; drawing is split across the components/ module.
//!
//! The loop is frame-coalesced: raw input mutates state synchronously, but
//! the navigator's active-state pass, the sidebar glides, and the resize
//! remeasure all run at most once per ~16 ms tick, and the terminal is only
//! redrawn when something actually changed.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::Style,
    Frame, Terminal,
};

use spyglass_core::{NavEffect, Navigator, Outline, ViewerConfig};

use crate::tui::components::outline_sidebar::{
    render_outline_sidebar, MIN_TERMINAL_WIDTH, SIDEBAR_WIDTH,
};
use crate::tui::components::scrollbars::render_scrollbar;
use crate::tui::components::status_bar::render_status_bar;
use crate::tui::components::toolbar::render_toolbar;
use crate::tui::components::OutlineSidebarState;
use crate::tui::markdown::DocumentCache;
use crate::tui::state::{LayoutState, ScrollState};
use crate::tui::themes::{Theme, THEME_REGISTRY};

/// Frame cadence of the event loop (~60fps)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Left padding of the document text inside the content pane
const CONTENT_PAD_X: u16 = 2;

/// Which pane owns keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Content,
    Outline,
}

/// Resolved layout for one frame
struct AppAreas {
    toolbar: Rect,
    content: Rect,
    sidebar: Option<Rect>,
    status: Rect,
}

/// Application state
pub struct App {
    pub title: String,
    pub text: String,
    pub theme: Theme,

    /// `None` when the document has no usable headings or the outline was
    /// disabled; the sidebar is simply not mounted then
    pub navigator: Option<Navigator>,
    pub cache: DocumentCache,

    pub scroll: ScrollState,
    pub sidebar: OutlineSidebarState,
    pub layout: LayoutState,
    pub focus: Focus,
    /// Row highlighted after a click scroll lands on its heading
    pub cursor_line: Option<usize>,
    /// User toggle for the sidebar
    pub outline_visible: bool,

    pub should_quit: bool,
    pub needs_redraw: bool,
    pub resize_pending: bool,
}

impl App {
    pub fn new(title: String, text: String, config: ViewerConfig) -> Self {
        let theme = THEME_REGISTRY
            .get_or_default(config.theme.as_deref().unwrap_or("spyglass"))
            .clone();

        let navigator = if config.hide_outline {
            None
        } else {
            // An empty outline suppresses the whole navigator, silently
            Navigator::new(&Outline::parse(&text), config.navigator_config())
        };
        let sidebar = OutlineSidebarState::new(
            navigator
                .as_ref()
                .map(|nav| nav.entries().len())
                .unwrap_or(0),
        );

        Self {
            title,
            text,
            theme,
            navigator,
            cache: DocumentCache::new(),
            scroll: ScrollState::new(),
            sidebar,
            layout: LayoutState::new(),
            focus: Focus::Content,
            cursor_line: None,
            outline_visible: !config.hide_outline,
            should_quit: false,
            needs_redraw: true,
            // First frame measures everything
            resize_pending: true,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        result
    }

    /// Main event loop
    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        // Async event stream so the runtime keeps ticking with no input
        let mut event_stream = EventStream::new();

        loop {
            // Coalesced remeasure: any number of resize events since the
            // last frame collapse into one geometry pass
            if self.resize_pending {
                self.resize_pending = false;
                let size = terminal.size()?;
                self.refresh_geometry(Rect::new(0, 0, size.width, size.height));
                self.needs_redraw = true;
            }

            self.frame_tick(Instant::now());

            // Only render if something changed
            if self.needs_redraw {
                terminal.draw(|f| self.ui(f))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased; // Prefer events over the frame timeout

                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            Event::Key(key) => {
                                self.handle_key(key.code, key.modifiers);
                                self.needs_redraw = true;
                            }
                            Event::Mouse(mouse) => {
                                self.handle_mouse_event(mouse);
                                self.needs_redraw = true;
                            }
                            Event::Resize(_, _) => {
                                self.resize_pending = true;
                            }
                            _ => {}
                        }
                    }
                }
                _ = tokio::time::sleep(FRAME_INTERVAL) => {
                    // Timeout: fall through for animations and fades
                }
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Per-frame work: sidebar glides, scrollbar fade, navigator effects
    fn frame_tick(&mut self, now: Instant) {
        if self.sidebar.tick() {
            self.needs_redraw = true;
        }
        if self.scroll.fade_tick(now) {
            self.needs_redraw = true;
        }

        let effects = match self.navigator.as_mut() {
            Some(nav) => nav.on_frame(now, &self.sidebar),
            None => Vec::new(),
        };
        if !effects.is_empty() {
            self.needs_redraw = true;
        }

        for effect in effects {
            match effect {
                NavEffect::ScrollTo { position } => {
                    self.scroll.set_offset(position);
                    self.scroll.touch(now);
                }
                NavEffect::ScrollFinished { entry } => {
                    // Focus lands on the heading with no extra jump
                    self.cursor_line = self
                        .navigator
                        .as_ref()
                        .and_then(|nav| nav.entries().get(entry))
                        .and_then(|entry| self.cache.heading_line(&entry.id));
                    self.focus = Focus::Content;
                }
                NavEffect::ActiveChanged(activation) => {
                    self.sidebar.apply_activation(&activation);
                }
                NavEffect::NavScrollToEnd => {
                    self.sidebar.scroll_to_end();
                }
            }
        }
    }

    /// Re-render the document for the current size and hand the navigator
    /// a fresh measurement pass
    fn refresh_geometry(&mut self, frame: Rect) {
        let areas = self.compute_areas(frame);
        self.layout.toolbar_area = Some(areas.toolbar);
        self.layout.content_area = Some(areas.content);
        self.layout.sidebar_area = areas.sidebar;

        let wrap = Self::wrap_width(areas.content);
        let viewport = areas.content.height as usize;

        let rendered = self.cache.get_or_render(
            &self.text,
            self.navigator.as_ref().map(|nav| nav.entries()),
            wrap,
            &self.theme,
        );
        let total = rendered.lines.len();
        // The toolbar sits outside the scrolled pane, so nothing overlays
        // the document: header height is 0
        let measure = rendered.measure(viewport as f64, 0.0);

        self.scroll.set_bounds(total, viewport);
        if let Some(nav) = self.navigator.as_mut() {
            nav.remeasure(&measure);
            nav.note_scroll(self.scroll.offset());
        }
    }

    fn sidebar_mounted(&self) -> bool {
        self.outline_visible && self.navigator.is_some()
    }

    fn compute_areas(&self, frame: Rect) -> AppAreas {
        let [toolbar, middle, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame);

        let show_sidebar = self.sidebar_mounted() && frame.width >= MIN_TERMINAL_WIDTH;
        let (content, sidebar) = if show_sidebar {
            let [content, sidebar] =
                Layout::horizontal([Constraint::Min(20), Constraint::Length(SIDEBAR_WIDTH)])
                    .areas(middle);
            // Footer clearance: the sidebar stops short of the status bar
            let clearance = self
                .navigator
                .as_ref()
                .map(|nav| nav.config().footer_clearance.round() as u16)
                .unwrap_or(0)
                .min(sidebar.height.saturating_sub(3));
            let sidebar = Rect {
                height: sidebar.height - clearance,
                ..sidebar
            };
            (content, Some(sidebar))
        } else {
            (middle, None)
        };

        AppAreas {
            toolbar,
            content,
            sidebar,
            status,
        }
    }

    fn wrap_width(content: Rect) -> u16 {
        // Padding on the left, scrollbar column plus a gap on the right
        content.width.saturating_sub(CONTENT_PAD_X + 2)
    }

    /// Scroll the document by a relative amount from user input
    pub(crate) fn scroll_content_by(&mut self, delta: f64) {
        let offset = self.scroll.offset() + delta;
        self.scroll_content_to(offset);
    }

    /// Scroll the document to an absolute offset from user input. Takes
    /// over from any in-flight click scroll.
    pub(crate) fn scroll_content_to(&mut self, offset: f64) {
        let now = Instant::now();
        if let Some(nav) = self.navigator.as_mut() {
            nav.interrupt_scroll();
        }
        self.scroll.set_offset(offset);
        self.scroll.touch(now);
        self.cursor_line = None;
        if let Some(nav) = self.navigator.as_mut() {
            nav.note_scroll(self.scroll.offset());
        }
    }

    /// Click navigation on an outline entry
    pub(crate) fn activate_entry(&mut self, entry: usize) {
        let now = Instant::now();
        if let Some(nav) = self.navigator.as_mut() {
            if nav.navigate_to(entry, now) {
                self.sidebar.select(entry);
            }
        }
    }

    /// Active section trail for the status bar, e.g. `Background › History`
    fn active_trail(&self) -> String {
        let Some(nav) = self.navigator.as_ref() else {
            return String::new();
        };
        let entries = nav.entries();
        let Some(active) = nav.activation().active() else {
            return String::new();
        };
        let Some(entry) = entries.get(active) else {
            return String::new();
        };
        match entry.parent.and_then(|parent| entries.get(parent)) {
            Some(parent) => format!("{} › {}", parent.label, entry.label),
            None => entry.label.clone(),
        }
    }

    /// Draw one frame
    fn ui(&mut self, f: &mut Frame<'_>) {
        let frame_area = f.area();
        let areas = self.compute_areas(frame_area);
        self.layout.toolbar_area = Some(areas.toolbar);
        self.layout.content_area = Some(areas.content);
        self.layout.sidebar_area = areas.sidebar;

        let buf = f.buffer_mut();
        buf.set_style(
            frame_area,
            Style::default().bg(self.theme.bg).fg(self.theme.text),
        );

        render_toolbar(buf, areas.toolbar, &self.title, &self.theme);

        // Document pane
        if areas.content.width > CONTENT_PAD_X + 2 && areas.content.height > 0 {
            let wrap = Self::wrap_width(areas.content);
            let rendered = self.cache.get_or_render(
                &self.text,
                self.navigator.as_ref().map(|nav| nav.entries()),
                wrap,
                &self.theme,
            );

            let top = self.scroll.top_row();
            let visible = areas.content.height as usize;
            let text_x = areas.content.x + CONTENT_PAD_X;

            for (slot, line) in rendered.lines.iter().skip(top).take(visible).enumerate() {
                let y = areas.content.y + slot as u16;
                if self.cursor_line == Some(top + slot) {
                    buf.set_style(
                        Rect::new(
                            areas.content.x,
                            y,
                            areas.content.width.saturating_sub(1),
                            1,
                        ),
                        Style::default().bg(self.theme.selection_bg),
                    );
                }
                buf.set_line(text_x, y, line, wrap);
            }

            // Document scrollbar, faded out when scrolling is idle
            let track = Rect::new(
                areas.content.x + areas.content.width - 1,
                areas.content.y,
                1,
                areas.content.height,
            );
            self.layout.content_scrollbar_area =
                (self.scroll.max_scroll() > 0.0).then_some(track);
            if self.scroll.scrollbar_visible() {
                render_scrollbar(
                    buf,
                    track,
                    self.scroll.top_row(),
                    self.scroll.total_lines,
                    visible,
                    self.theme.scrollbar_thumb,
                    self.theme.scrollbar_track,
                );
            }
        } else {
            self.layout.content_scrollbar_area = None;
        }

        // Outline sidebar
        match (self.navigator.as_ref(), areas.sidebar) {
            (Some(nav), Some(area)) => {
                let result = render_outline_sidebar(
                    buf,
                    area,
                    nav,
                    &mut self.sidebar,
                    self.focus == Focus::Outline,
                    &self.theme,
                );
                self.layout.sidebar_scrollbar_area = result.scrollbar_area;
            }
            _ => {
                self.layout.sidebar_scrollbar_area = None;
            }
        }

        let trail = self.active_trail();
        render_status_bar(buf, areas.status, &trail, self.scroll.percent(), &self.theme);
    }
}
