//! Markdown rendering for the document pane
//!
//! Renders the document to styled, width-wrapped lines and records the row
//! of every outline heading, so the navigator reads its geometry from the
//! rendered layout rather than from any cached math. Output is cached per
//! wrap width; a resize invalidates it.

use std::collections::HashMap;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use spyglass_core::{DocumentLayout, EntryDepth, NavEntries, OutlineLevels};

use crate::tui::themes::Theme;

/// Row of one outline heading in the rendered document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHeading {
    pub id: String,
    pub line: usize,
}

/// A document rendered at one wrap width
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub lines: Vec<Line<'static>>,
    pub headings: Vec<RenderedHeading>,
}

impl RenderedDocument {
    pub fn heading_line(&self, id: &str) -> Option<usize> {
        self.headings
            .iter()
            .find(|heading| heading.id == id)
            .map(|heading| heading.line)
    }

    /// Snapshot the measurements the navigator needs. `header` is the
    /// height of any chrome overlaying the pane; the bundled viewer keeps
    /// its toolbar outside the scrolled area and passes 0.
    pub fn measure(&self, viewport: f64, header: f64) -> DocumentMeasure {
        DocumentMeasure {
            header,
            viewport,
            height: self.lines.len() as f64,
            tops: self
                .headings
                .iter()
                .map(|heading| (heading.id.clone(), heading.line as f64))
                .collect(),
        }
    }
}

/// Owned measurement snapshot implementing the navigator's layout trait
#[derive(Debug, Clone)]
pub struct DocumentMeasure {
    header: f64,
    viewport: f64,
    height: f64,
    tops: HashMap<String, f64>,
}

impl DocumentLayout for DocumentMeasure {
    fn header_height(&self) -> f64 {
        self.header
    }
    fn viewport_height(&self) -> f64 {
        self.viewport
    }
    fn document_height(&self) -> f64 {
        self.height
    }
    fn heading_top(&self, id: &str) -> Option<f64> {
        self.tops.get(id).copied()
    }
}

/// Width-keyed render cache (avoids re-rendering every frame)
#[derive(Debug, Default)]
pub struct DocumentCache {
    width: u16,
    rendered: Option<RenderedDocument>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_render(
        &mut self,
        text: &str,
        entries: Option<&NavEntries>,
        width: u16,
        theme: &Theme,
    ) -> &RenderedDocument {
        if self.width != width {
            self.rendered = None;
            self.width = width;
        }
        self.rendered
            .get_or_insert_with(|| render_document(text, entries, width as usize, theme))
    }

    pub fn rendered(&self) -> Option<&RenderedDocument> {
        self.rendered.as_ref()
    }

    pub fn heading_line(&self, id: &str) -> Option<usize> {
        self.rendered.as_ref()?.heading_line(id)
    }
}

/// Render the whole document at the given wrap width. `entries` lets the
/// renderer tag heading rows with their outline ids; headings the outline
/// skipped are rendered but not tagged.
pub fn render_document(
    text: &str,
    entries: Option<&NavEntries>,
    width: usize,
    theme: &Theme,
) -> RenderedDocument {
    let width = width.max(10);
    let parser = Parser::new_ext(text, Options::ENABLE_HEADING_ATTRIBUTES);
    let mut renderer = Renderer {
        theme,
        width,
        levels: OutlineLevels::default(),
        entries,
        next_entry: 0,
        lines: Vec::new(),
        headings: Vec::new(),
        spans: Vec::new(),
        heading_plain: String::new(),
        heading: None,
        strong: 0,
        emphasis: 0,
        link: 0,
        quote_depth: 0,
        list_stack: Vec::new(),
        item_fresh: false,
        code_block: None,
        table_cell_open: false,
    };

    for event in parser {
        renderer.handle(event);
    }
    renderer.flush_paragraph();

    // Drop a single trailing blank line so the document ends on content
    if renderer.lines.last().is_some_and(|line| line.width() == 0) {
        renderer.lines.pop();
    }

    RenderedDocument {
        lines: renderer.lines,
        headings: renderer.headings,
    }
}

struct Renderer<'a> {
    theme: &'a Theme,
    width: usize,
    levels: OutlineLevels,
    entries: Option<&'a NavEntries>,
    next_entry: usize,

    lines: Vec<Line<'static>>,
    headings: Vec<RenderedHeading>,

    spans: Vec<Span<'static>>,
    heading_plain: String,
    heading: Option<HeadingLevel>,
    strong: usize,
    emphasis: usize,
    link: usize,
    quote_depth: usize,
    /// Ordered list counters; `None` entries are bullet lists
    list_stack: Vec<Option<u64>>,
    /// The next flush is the first line of a list item
    item_fresh: bool,
    code_block: Option<String>,
    table_cell_open: bool,
}

impl Renderer<'_> {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some(code) = self.code_block.as_mut() {
                    code.push_str(&text);
                } else {
                    if self.heading.is_some() {
                        self.heading_plain.push_str(&text);
                    }
                    let style = self.inline_style(false);
                    self.spans.push(Span::styled(text.into_string(), style));
                }
            }
            Event::Code(code) => {
                if self.heading.is_some() {
                    self.heading_plain.push_str(&code);
                }
                let style = self.inline_style(true);
                self.spans.push(Span::styled(code.into_string(), style));
            }
            Event::SoftBreak | Event::HardBreak => {
                if self.heading.is_some() {
                    self.heading_plain.push(' ');
                }
                if let Some(code) = self.code_block.as_mut() {
                    code.push('\n');
                } else {
                    self.spans
                        .push(Span::styled(" ".to_string(), self.inline_style(false)));
                }
            }
            Event::Rule => {
                self.flush_paragraph();
                let bar = "─".repeat(self.width.min(60));
                self.lines
                    .push(Line::from(Span::styled(bar, Style::default().fg(self.theme.border))));
                self.blank_line();
            }
            // Raw HTML and the rest have no terminal rendering
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_paragraph();
                self.heading = Some(level);
                self.heading_plain.clear();
            }
            Tag::BlockQuote(_) => {
                self.flush_paragraph();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(_) => {
                self.flush_paragraph();
                self.code_block = Some(String::new());
            }
            Tag::List(start) => {
                self.flush_paragraph();
                self.list_stack.push(start);
            }
            Tag::Item => {
                self.flush_paragraph();
                self.item_fresh = true;
            }
            Tag::Emphasis => self.emphasis += 1,
            Tag::Strong => self.strong += 1,
            Tag::Link { .. } => self.link += 1,
            Tag::Table(_) => {
                self.flush_paragraph();
            }
            Tag::TableCell => {
                if self.table_cell_open {
                    self.spans.push(Span::styled(
                        "  ".to_string(),
                        Style::default().fg(self.theme.dim),
                    ));
                }
                self.table_cell_open = true;
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_paragraph();
                if self.list_stack.is_empty() && self.quote_depth == 0 {
                    self.blank_line();
                }
            }
            TagEnd::Heading(level) => self.close_heading(level),
            TagEnd::BlockQuote(_) => {
                self.flush_paragraph();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                if self.quote_depth == 0 {
                    self.blank_line();
                }
            }
            TagEnd::CodeBlock => self.close_code_block(),
            TagEnd::List(_) => {
                self.flush_paragraph();
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => {
                self.flush_paragraph();
                if let Some(Some(counter)) = self.list_stack.last_mut() {
                    *counter += 1;
                }
            }
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Link => self.link = self.link.saturating_sub(1),
            TagEnd::TableHead | TagEnd::TableRow => {
                self.table_cell_open = false;
                self.flush_paragraph();
            }
            TagEnd::Table => {
                self.table_cell_open = false;
                self.flush_paragraph();
                self.blank_line();
            }
            _ => {}
        }
    }

    fn inline_style(&self, code: bool) -> Style {
        let mut style = if let Some(level) = self.heading {
            self.heading_style(level)
        } else if code {
            Style::default().fg(self.theme.code)
        } else if self.quote_depth > 0 {
            Style::default().fg(self.theme.quote)
        } else {
            Style::default().fg(self.theme.text)
        };
        if self.strong > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.emphasis > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.link > 0 {
            style = style.fg(self.theme.accent).add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    fn heading_style(&self, level: HeadingLevel) -> Style {
        let color = if level == self.levels.top {
            self.theme.heading
        } else if level == self.levels.sub {
            self.theme.sub_heading
        } else {
            self.theme.text
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    fn quote_prefix(&self) -> Vec<Span<'static>> {
        if self.quote_depth == 0 {
            return Vec::new();
        }
        vec![Span::styled(
            "│ ".repeat(self.quote_depth),
            Style::default().fg(self.theme.quote),
        )]
    }

    fn item_prefix(&mut self) -> (Vec<Span<'static>>, Vec<Span<'static>>) {
        let depth = self.list_stack.len().max(1);
        let indent = "  ".repeat(depth - 1);
        let marker = match self.list_stack.last() {
            Some(Some(counter)) => format!("{indent}{counter}. "),
            _ => format!("{indent}• "),
        };
        let continuation = " ".repeat(marker.width());
        let style = Style::default().fg(self.theme.dim);
        (
            vec![Span::styled(marker, style)],
            vec![Span::raw(continuation)],
        )
    }

    fn blank_line(&mut self) {
        self.lines.push(Line::from(""));
    }

    /// Wrap and emit the buffered inline spans as one block
    fn flush_paragraph(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.spans);

        let (first_prefix, cont_prefix) = if self.item_fresh {
            self.item_fresh = false;
            let (first, cont) = self.item_prefix();
            let mut quoted_first = self.quote_prefix();
            quoted_first.extend(first);
            let mut quoted_cont = self.quote_prefix();
            quoted_cont.extend(cont);
            (quoted_first, quoted_cont)
        } else {
            (self.quote_prefix(), self.quote_prefix())
        };

        let wrapped = wrap_spans(spans, self.width, &first_prefix, &cont_prefix);
        self.lines.extend(wrapped);
    }

    fn close_heading(&mut self, level: HeadingLevel) {
        self.heading = None;
        self.tag_outline_heading(level);

        let spans = std::mem::take(&mut self.spans);
        let prefix = self.quote_prefix();
        let wrapped = wrap_spans(spans, self.width, &prefix, &prefix);
        self.lines.extend(wrapped);
        self.blank_line();
    }

    /// Match this heading against the next expected outline entry and, when
    /// it lines up, record the row it is about to occupy. The acceptance
    /// rules mirror the outline parser; a mismatch just leaves the heading
    /// untagged and geometry drops it later.
    fn tag_outline_heading(&mut self, level: HeadingLevel) {
        let Some(entries) = self.entries else {
            return;
        };
        let depth = if level == self.levels.top && self.quote_depth == 0 {
            EntryDepth::One
        } else if level == self.levels.sub && self.quote_depth <= 1 {
            EntryDepth::Two
        } else {
            return;
        };
        let Some(entry) = entries.get(self.next_entry) else {
            return;
        };
        if entry.depth != depth || entry.label != self.heading_plain.trim() {
            return;
        }
        self.headings.push(RenderedHeading {
            id: entry.id.clone(),
            line: self.lines.len(),
        });
        self.next_entry += 1;
    }

    fn close_code_block(&mut self) {
        let Some(code) = self.code_block.take() else {
            return;
        };
        let style = Style::default().fg(self.theme.code);
        let avail = self.width.saturating_sub(2).max(8);
        for raw in code.trim_end_matches('\n').split('\n') {
            if raw.is_empty() {
                self.lines.push(Line::from(""));
                continue;
            }
            for chunk in chunk_by_width(raw, avail) {
                self.lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(chunk, style),
                ]));
            }
        }
        self.blank_line();
    }
}

/// Hard-split a string into chunks no wider than `width` display columns
fn chunk_by_width(s: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(1);
        if current_width + w > width && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += w;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// One wrappable word: styled fragments glued without spaces
struct Word {
    fragments: Vec<(String, Style)>,
    width: usize,
}

/// Word-wrap styled spans to `width` display columns, attaching prefix
/// spans to the first and continuation lines. Adjacent spans with no
/// whitespace between them stay glued together as one word.
fn wrap_spans(
    spans: Vec<Span<'static>>,
    width: usize,
    first_prefix: &[Span<'static>],
    cont_prefix: &[Span<'static>],
) -> Vec<Line<'static>> {
    let words = split_words(spans);
    let prefix_width = |prefix: &[Span<'static>]| -> usize {
        prefix.iter().map(|span| span.content.width()).sum()
    };

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = first_prefix.to_vec();
    let mut current_width = prefix_width(first_prefix);
    let mut has_content = false;

    let mut flush =
        |current: &mut Vec<Span<'static>>, current_width: &mut usize, has_content: &mut bool| {
            lines.push(Line::from(std::mem::take(current)));
            *current = cont_prefix.to_vec();
            *current_width = prefix_width(cont_prefix);
            *has_content = false;
        };

    for word in words {
        let sep = usize::from(has_content);
        if current_width + sep + word.width <= width {
            if has_content {
                current.push(Span::raw(" "));
            }
            current_width += sep + word.width;
            for (text, style) in word.fragments {
                current.push(Span::styled(text, style));
            }
            has_content = true;
            continue;
        }

        if has_content {
            flush(&mut current, &mut current_width, &mut has_content);
        }

        if current_width + word.width <= width {
            current_width += word.width;
            for (text, style) in word.fragments {
                current.push(Span::styled(text, style));
            }
            has_content = true;
        } else {
            // Word wider than a whole line: hard-break it
            let avail = width.saturating_sub(current_width).max(1);
            for (text, style) in word.fragments {
                for chunk in chunk_by_width(&text, avail) {
                    let chunk_width = chunk.width();
                    if current_width + chunk_width > width && has_content {
                        flush(&mut current, &mut current_width, &mut has_content);
                    }
                    current_width += chunk_width;
                    current.push(Span::styled(chunk, style));
                    has_content = true;
                }
            }
        }
    }

    if has_content || lines.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

fn split_words(spans: Vec<Span<'static>>) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    let mut current: Vec<(String, Style)> = Vec::new();
    let mut current_width = 0usize;

    for span in spans {
        let style = span.style;
        let content = span.content.into_owned();
        let mut fragment = String::new();

        for ch in content.chars() {
            if ch.is_whitespace() {
                if !fragment.is_empty() {
                    current_width += fragment.width();
                    current.push((std::mem::take(&mut fragment), style));
                }
                if !current.is_empty() {
                    words.push(Word {
                        fragments: std::mem::take(&mut current),
                        width: current_width,
                    });
                    current_width = 0;
                }
            } else {
                fragment.push(ch);
            }
        }
        if !fragment.is_empty() {
            current_width += fragment.width();
            current.push((fragment, style));
        }
    }
    if !current.is_empty() {
        words.push(Word {
            fragments: current,
            width: current_width,
        });
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::themes::THEME_REGISTRY;
    use spyglass_core::Outline;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    const DOC: &str = "\
# Intro

Some opening prose that is long enough to wrap across a couple of rows at a
narrow width.

# Background

## History

Body text.

### Detail heading

## Methods

- first item
- second item with quite a lot of text that will need to wrap onto another row

```text
code line
```
";

    fn render(width: usize) -> RenderedDocument {
        let entries = NavEntries::from_outline(&Outline::parse(DOC));
        let theme = THEME_REGISTRY.get_or_default("spyglass");
        render_document(DOC, Some(&entries), width, theme)
    }

    #[test]
    fn test_headings_are_tagged_in_order() {
        let rendered = render(60);
        let ids: Vec<&str> = rendered
            .headings
            .iter()
            .map(|heading| heading.id.as_str())
            .collect();
        assert_eq!(
            ids,
            ["nav-title-1", "nav-title-2", "nav-title-2-1", "nav-title-2-2"]
        );

        // Rows are strictly increasing and point at the heading text
        let mut last = None;
        for heading in &rendered.headings {
            assert!(Some(heading.line) > last);
            last = Some(heading.line);
        }
        let intro = rendered.heading_line("nav-title-1").unwrap();
        assert_eq!(plain(&rendered.lines[intro]), "Intro");
        let methods = rendered.heading_line("nav-title-2-2").unwrap();
        assert_eq!(plain(&rendered.lines[methods]), "Methods");
    }

    #[test]
    fn test_untracked_heading_levels_render_untagged() {
        let rendered = render(60);
        assert!(rendered
            .lines
            .iter()
            .any(|line| plain(line) == "Detail heading"));
        assert!(rendered.headings.iter().all(|h| {
            plain(&rendered.lines[h.line]) != "Detail heading"
        }));
    }

    #[test]
    fn test_wrap_respects_width() {
        let rendered = render(30);
        for line in &rendered.lines {
            assert!(
                plain(line).width() <= 30,
                "line too wide: {:?}",
                plain(line)
            );
        }
    }

    #[test]
    fn test_list_items_get_markers_and_hanging_indent() {
        let rendered = render(30);
        let first = rendered
            .lines
            .iter()
            .position(|line| plain(line).starts_with("• first"))
            .expect("bullet line");
        assert!(plain(&rendered.lines[first]).starts_with("• "));

        let long = rendered
            .lines
            .iter()
            .position(|line| plain(line).starts_with("• second"))
            .expect("second bullet");
        // Continuation rows are indented under the bullet text
        assert!(plain(&rendered.lines[long + 1]).starts_with("  "));
    }

    #[test]
    fn test_code_block_is_indented() {
        let rendered = render(60);
        assert!(rendered
            .lines
            .iter()
            .any(|line| plain(line) == "  code line"));
    }

    #[test]
    fn test_measure_implements_document_layout() {
        let rendered = render(60);
        let measure = rendered.measure(24.0, 0.0);

        assert_eq!(measure.viewport_height(), 24.0);
        assert_eq!(measure.header_height(), 0.0);
        assert_eq!(measure.document_height(), rendered.lines.len() as f64);
        assert_eq!(
            measure.heading_top("nav-title-2"),
            rendered.heading_line("nav-title-2").map(|line| line as f64)
        );
        assert_eq!(measure.heading_top("missing"), None);
    }

    #[test]
    fn test_cache_invalidates_on_width_change() {
        let entries = NavEntries::from_outline(&Outline::parse(DOC));
        let theme = THEME_REGISTRY.get_or_default("spyglass");
        let mut cache = DocumentCache::new();

        let tall = cache
            .get_or_render(DOC, Some(&entries), 24, theme)
            .lines
            .len();
        let wide = cache
            .get_or_render(DOC, Some(&entries), 100, theme)
            .lines
            .len();
        assert!(tall > wide);
        assert!(cache.heading_line("nav-title-1").is_some());
    }
}
