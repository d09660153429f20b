//! Input handlers
//!
//! Keyboard and mouse handling as `impl App` blocks, split by device.

pub mod keyboard;
pub mod mouse;
