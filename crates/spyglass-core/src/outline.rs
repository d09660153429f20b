//! Document outline extraction
//!
//! Builds the two-level heading outline that drives the navigator: depth-1
//! sections with optional depth-2 subsections, each carrying a stable
//! identifier. Identifiers come from an explicit `{#id}` heading attribute
//! when present and are synthesized deterministically otherwise, so parsing
//! the same document twice yields the same ids.

use std::collections::HashSet;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::constants::nav;

/// One heading in the outline. Depth-2 nodes never have children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingNode {
    /// Stable identifier, unique within the document
    pub id: String,
    /// Heading text with surrounding whitespace trimmed
    pub text: String,
    /// Depth-2 subsections in document order
    pub children: Vec<HeadingNode>,
}

/// Which Markdown heading levels map to the two outline depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineLevels {
    pub top: HeadingLevel,
    pub sub: HeadingLevel,
}

impl Default for OutlineLevels {
    fn default() -> Self {
        Self {
            top: HeadingLevel::H1,
            sub: HeadingLevel::H2,
        }
    }
}

/// The two-level heading hierarchy extracted from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub nodes: Vec<HeadingNode>,
}

/// Heading currently being captured from the event stream.
struct Capture {
    top_level: bool,
    explicit_id: Option<String>,
    text: String,
}

impl Outline {
    /// Parse with the default H1/H2 mapping.
    pub fn parse(text: &str) -> Self {
        Self::parse_with_levels(text, OutlineLevels::default())
    }

    /// Scan top-level headings in document order, collecting the
    /// second-level headings that follow each one until the next top-level
    /// heading. A second-level heading counts when it appears directly or
    /// nested one layer inside a blockquote; anything deeper is skipped, as
    /// is a second-level heading with no preceding top-level one. An empty
    /// outline is a valid result and means the caller should not mount a
    /// navigator at all.
    pub fn parse_with_levels(text: &str, levels: OutlineLevels) -> Self {
        let parser = Parser::new_ext(text, Options::ENABLE_HEADING_ATTRIBUTES);

        let mut nodes: Vec<HeadingNode> = Vec::new();
        let mut taken: HashSet<String> = HashSet::new();
        let mut quote_depth = 0usize;
        let mut capture: Option<Capture> = None;

        for event in parser {
            match event {
                Event::Start(Tag::BlockQuote(_)) => quote_depth += 1,
                Event::End(TagEnd::BlockQuote(_)) => {
                    quote_depth = quote_depth.saturating_sub(1);
                }
                Event::Start(Tag::Heading { level, id, .. }) => {
                    let explicit_id = id.map(|id| id.to_string());
                    if level == levels.top && quote_depth == 0 {
                        capture = Some(Capture {
                            top_level: true,
                            explicit_id,
                            text: String::new(),
                        });
                    } else if level == levels.sub && quote_depth <= 1 && !nodes.is_empty() {
                        capture = Some(Capture {
                            top_level: false,
                            explicit_id,
                            text: String::new(),
                        });
                    }
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(heading) = capture.take() {
                        close_heading(heading, &mut nodes, &mut taken);
                    }
                }
                Event::Text(t) | Event::Code(t) => {
                    if let Some(heading) = capture.as_mut() {
                        heading.text.push_str(&t);
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    if let Some(heading) = capture.as_mut() {
                        heading.text.push(' ');
                    }
                }
                _ => {}
            }
        }

        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn close_heading(heading: Capture, nodes: &mut Vec<HeadingNode>, taken: &mut HashSet<String>) {
    let text = heading.text.trim().to_string();

    if heading.top_level {
        let synthesized = format!("{}-{}", nav::ID_PREFIX, nodes.len() + 1);
        let id = claim_id(heading.explicit_id, synthesized, taken);
        nodes.push(HeadingNode {
            id,
            text,
            children: Vec::new(),
        });
    } else {
        // parse_with_levels only opens a sub capture once a section exists
        let parent_n = nodes.len();
        let Some(parent) = nodes.last_mut() else {
            return;
        };
        let synthesized = format!(
            "{}-{}-{}",
            nav::ID_PREFIX,
            parent_n,
            parent.children.len() + 1
        );
        let id = claim_id(heading.explicit_id, synthesized, taken);
        parent.children.push(HeadingNode {
            id,
            text,
            children: Vec::new(),
        });
    }
}

/// Prefer the explicit id when it is still free; otherwise fall back to the
/// synthesized one, bumping a suffix until unique. Ids must stay unique
/// within the document.
fn claim_id(explicit: Option<String>, synthesized: String, taken: &mut HashSet<String>) -> String {
    if let Some(id) = explicit {
        if taken.insert(id.clone()) {
            return id;
        }
    }
    let mut id = synthesized.clone();
    let mut bump = 1;
    while !taken.insert(id.clone()) {
        bump += 1;
        id = format!("{synthesized}-{bump}");
    }
    id
}
