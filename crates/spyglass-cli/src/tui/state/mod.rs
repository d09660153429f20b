//! App state components
//!
//! Centralized state for the viewer, grouped into logical modules.

mod layout;
mod scroll;

pub use layout::{DragTarget, LayoutState, ScrollbarDrag};
pub use scroll::ScrollState;
