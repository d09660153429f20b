//! Crate constants and configuration defaults
//!
//! Centralized location for magic numbers and default values.

use std::time::Duration;

/// Navigation engine defaults
pub mod nav {
    use super::Duration;

    /// Prefix for synthesized heading identifiers
    pub const ID_PREFIX: &str = "nav-title";

    /// Smooth-scroll animation duration
    pub const SCROLL_DURATION: Duration = Duration::from_millis(500);

    /// Clearance kept above a heading when click-scrolling to it
    pub const HEADER_CLEARANCE: f64 = 80.0;

    /// Lead-in added to the scroll position when probing for the active
    /// section, so a heading lights up as it passes under the header rather
    /// than flickering right at the boundary
    pub const PROBE_BUFFER: f64 = 24.0;

    /// Clearance the nav widget keeps above the page footer
    pub const FOOTER_CLEARANCE: f64 = 32.0;

    /// Slack when deciding the viewport has reached the document end
    pub const BOTTOM_SLACK: f64 = 5.0;
}

/// Filesystem layout
pub mod fs {
    /// Config directory name (under the home directory)
    pub const CONFIG_DIR_NAME: &str = ".spyglass";

    /// Logs subdirectory name
    pub const LOGS_DIR_NAME: &str = "logs";

    /// Config file name
    pub const CONFIG_FILE_NAME: &str = "spyglass.toml";
}
