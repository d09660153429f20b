//! Activation state and marker placement
//!
//! Applies the active/inactive state the spy (or a click) decided on.
//! Exactly one entry is active at a time; activating a depth-2 entry also
//! marks its depth-1 ancestor, and activating a depth-1 entry with children
//! pre-positions the group marker on its first child (style only). The nav
//! widget's own scroll container is moved just enough to keep the depth-1
//! row visible, never force-centered.

use crate::entries::{EntryDepth, NavEntries};

/// Row geometry the controller needs from the rendered nav widget.
pub trait NavWidget {
    /// `(top, height)` of the entry's row box in the widget's scroll space.
    fn entry_bounds(&self, entry: usize) -> Option<(f64, f64)>;

    /// `(scroll_offset, visible_height)` of the widget's scroll container.
    fn scroll_viewport(&self) -> (f64, f64);
}

/// Where the sliding group marker should sit, fully visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPlacement {
    /// Depth-1 entry owning the visible marker
    pub group: usize,
    pub top: f64,
    pub height: f64,
}

/// Result of a successful activation.
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    pub entry: usize,
    /// Depth-1 ancestor that is active alongside a depth-2 target
    pub parent: Option<usize>,
    /// First child styled along with a depth-1 target. Style only; it is
    /// not the current section.
    pub styled_child: Option<usize>,
    /// The single visible group marker; `None` hides all markers
    pub marker: Option<MarkerPlacement>,
    /// New scroll offset for the nav widget, when the depth-1 row is not
    /// already fully visible
    pub nav_scroll: Option<f64>,
}

#[derive(Debug, Default)]
pub struct ActivationController {
    active: Option<usize>,
    parent: Option<usize>,
    styled_child: Option<usize>,
    marker: Option<MarkerPlacement>,
}

impl ActivationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply active state for `entry`. Returns `None` when it is already
    /// the active entry, leaving all state untouched.
    pub fn activate(
        &mut self,
        entry: usize,
        entries: &NavEntries,
        nav: &impl NavWidget,
    ) -> Option<Activation> {
        if self.active == Some(entry) {
            return None;
        }
        let target = entries.get(entry)?;
        let group = entries.group_of(entry)?;

        let (parent, marker_row, styled_child) = match target.depth {
            EntryDepth::Two => (target.parent, Some(entry), None),
            EntryDepth::One => {
                let child = entries.first_child(entry);
                (None, child, child)
            }
        };

        let marker = marker_row.and_then(|row| {
            nav.entry_bounds(row)
                .map(|(top, height)| MarkerPlacement { group, top, height })
        });

        let nav_scroll = nav.entry_bounds(group).and_then(|(top, height)| {
            let (offset, visible) = nav.scroll_viewport();
            if top < offset {
                Some(top)
            } else if top + height > offset + visible {
                Some(top + height - visible)
            } else {
                None
            }
        });

        self.active = Some(entry);
        self.parent = parent;
        self.styled_child = styled_child;
        self.marker = marker;

        Some(Activation {
            entry,
            parent,
            styled_child,
            marker,
            nav_scroll,
        })
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// The entry carries "current section" state: the active entry or its
    /// dual-active depth-1 ancestor.
    pub fn is_current(&self, entry: usize) -> bool {
        self.active == Some(entry) || self.parent == Some(entry)
    }

    /// The entry carries any active styling, including a depth-1 target's
    /// pre-activated first child.
    pub fn is_styled(&self, entry: usize) -> bool {
        self.is_current(entry) || self.styled_child == Some(entry)
    }

    pub fn marker(&self) -> Option<MarkerPlacement> {
        self.marker
    }
}
