//! Spyglass Core - The scroll-spy navigation engine
//!
//! This crate provides the document-outline navigation engine behind the
//! Spyglass viewer:
//! - Outline parsing from Markdown heading markup
//! - Geometry tracking over a host-provided document layout
//! - Active-entry computation under scroll
//! - Activation state: marker placement and minimal-motion nav scrolling
//! - A cancelable, time-based smooth-scroll animation
//!
//! The engine is host-agnostic: all vertical measurements are in whatever
//! unit the host's [`DocumentLayout`] reports (terminal rows for the bundled
//! viewer). Everything is owned by a single [`Navigator`] instance, so a
//! process can run any number of independent navigators.

pub mod activation;
pub mod config;
pub mod constants;
pub mod entries;
pub mod geometry;
pub mod navigator;
pub mod outline;
pub mod paths;
pub mod scroller;
pub mod spy;

// Re-exports for convenience
pub use activation::{Activation, ActivationController, MarkerPlacement, NavWidget};
pub use config::{ConfigError, NavigatorConfig, NavigatorOverrides, ViewerConfig};
pub use entries::{EntryDepth, NavEntries, NavEntry};
pub use geometry::{DocumentLayout, Geometry, SectionOffset};
pub use navigator::{NavEffect, Navigator};
pub use outline::{HeadingNode, Outline, OutlineLevels};
pub use scroller::{ScrollFrame, SmoothScroller};
pub use spy::SpyOutcome;
