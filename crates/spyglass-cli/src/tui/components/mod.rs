//! Reusable UI components

pub mod outline_sidebar;
pub mod scrollbars;
pub mod status_bar;
pub mod toolbar;

pub use outline_sidebar::{OutlineSidebarState, SidebarRenderResult};
