//! Flattened navigation entries
//!
//! The clickable counterpart of the outline: one entry per heading whose
//! label is non-empty, in document order, with depth-2 entries linked back
//! to their depth-1 parent. Built once per navigator lifetime; the list
//! never changes after that.

use crate::outline::Outline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryDepth {
    One,
    Two,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    /// Target heading identifier
    pub id: String,
    pub depth: EntryDepth,
    pub label: String,
    /// Index of the depth-1 parent entry; `None` for depth-1 entries
    pub parent: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct NavEntries {
    entries: Vec<NavEntry>,
}

impl NavEntries {
    /// Flatten the outline. Headings with blank text get no entry, and a
    /// blank depth-1 heading takes its subsections with it (they would have
    /// no parent to attach to).
    pub fn from_outline(outline: &Outline) -> Self {
        let mut entries = Vec::new();
        for node in &outline.nodes {
            if node.text.is_empty() {
                continue;
            }
            let parent_index = entries.len();
            entries.push(NavEntry {
                id: node.id.clone(),
                depth: EntryDepth::One,
                label: node.text.clone(),
                parent: None,
            });
            for child in &node.children {
                if child.text.is_empty() {
                    continue;
                }
                entries.push(NavEntry {
                    id: child.id.clone(),
                    depth: EntryDepth::Two,
                    label: child.text.clone(),
                    parent: Some(parent_index),
                });
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NavEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NavEntry> {
        self.entries.iter()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Depth-1 ancestor of an entry; the entry itself when already depth-1.
    pub fn group_of(&self, index: usize) -> Option<usize> {
        let entry = self.get(index)?;
        Some(entry.parent.unwrap_or(index))
    }

    /// First depth-2 child of a depth-1 entry. Children directly follow
    /// their parent in document order.
    pub fn first_child(&self, index: usize) -> Option<usize> {
        let candidate = index + 1;
        (self.get(candidate)?.parent == Some(index)).then_some(candidate)
    }

    /// Whether a depth-1 entry has any children.
    pub fn has_children(&self, index: usize) -> bool {
        self.first_child(index).is_some()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.entries.len().checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(doc: &str) -> NavEntries {
        NavEntries::from_outline(&Outline::parse(doc))
    }

    #[test]
    fn test_flat_document_has_no_sub_entries() {
        let entries = entries("# A\n\n# B\n\n# C\n");
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.depth == EntryDepth::One));
        assert!(entries.iter().all(|e| e.parent.is_none()));
    }

    #[test]
    fn test_children_link_to_parent() {
        let entries = entries("# A\n\n## A1\n\n## A2\n\n# B\n\n## B1\n");
        assert_eq!(entries.len(), 5);
        assert_eq!(entries.get(1).unwrap().parent, Some(0));
        assert_eq!(entries.get(2).unwrap().parent, Some(0));
        assert_eq!(entries.get(4).unwrap().parent, Some(3));

        assert_eq!(entries.group_of(2), Some(0));
        assert_eq!(entries.group_of(3), Some(3));
        assert_eq!(entries.first_child(0), Some(1));
        assert_eq!(entries.first_child(3), Some(4));
        assert!(!entries.has_children(1));
    }

    #[test]
    fn test_lookup_by_id() {
        let entries = entries("# A\n\n## A1 {#first}\n");
        assert_eq!(entries.index_of("first"), Some(1));
        assert_eq!(entries.index_of("missing"), None);
    }

    #[test]
    fn test_blank_heading_gets_no_entry() {
        // An empty heading still parses as a node but yields no entry
        let entries = entries("#   \n\n# Real\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get(0).unwrap().label, "Real");
    }
}
