//! Keyboard handling

use crossterm::event::{KeyCode, KeyModifiers};

use crate::tui::app::{App, Focus};

impl App {
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        // Global keys first
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.toggle_focus();
                return;
            }
            KeyCode::Char('o') => {
                self.toggle_outline();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Content => self.handle_content_key(code, modifiers),
            Focus::Outline => self.handle_outline_key(code),
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Content if self.navigator.is_some() && self.outline_visible => Focus::Outline,
            _ => Focus::Content,
        };
    }

    fn toggle_outline(&mut self) {
        if self.navigator.is_none() {
            return;
        }
        self.outline_visible = !self.outline_visible;
        if !self.outline_visible {
            self.focus = Focus::Content;
        }
        // The content pane changes width, so geometry is stale
        self.resize_pending = true;
    }

    fn handle_content_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let page = (self.scroll.viewport.saturating_sub(2)).max(1) as f64;
        match code {
            KeyCode::Char('j') | KeyCode::Down => self.scroll_content_by(1.0),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_content_by(-1.0),
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.scroll_content_by(page / 2.0);
            }
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.scroll_content_by(-page / 2.0);
            }
            KeyCode::PageDown => self.scroll_content_by(page),
            KeyCode::PageUp => self.scroll_content_by(-page),
            KeyCode::Char('g') | KeyCode::Home => self.scroll_content_to(0.0),
            KeyCode::Char('G') | KeyCode::End => {
                self.scroll_content_to(self.scroll.max_scroll());
            }
            _ => {}
        }
    }

    fn handle_outline_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('j') | KeyCode::Down => self.sidebar.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.sidebar.select_prev(),
            KeyCode::Char('g') | KeyCode::Home => self.sidebar.select(0),
            KeyCode::Char('G') | KeyCode::End => {
                if let Some(nav) = self.navigator.as_ref() {
                    if let Some(last) = nav.entries().last_index() {
                        self.sidebar.select(last);
                    }
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.activate_entry(self.sidebar.selected);
            }
            _ => {}
        }
    }
}
