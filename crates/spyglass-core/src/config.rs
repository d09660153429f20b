//! Navigator and viewer configuration
//!
//! Every knob is optional with a default. The bundled viewer overlays
//! values from `~/.spyglass/spyglass.toml` and its command line on top of
//! row-scale defaults; library users get the original pixel-scale defaults
//! via [`NavigatorConfig::default`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::constants::nav;
use crate::paths;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Tunables for one navigator instance.
///
/// Geometry fields are in the host's vertical unit: whatever the
/// [`DocumentLayout`](crate::geometry::DocumentLayout) implementation
/// reports. The defaults carry the empirical values the scroll spy was
/// tuned with on pixel-based hosts; [`NavigatorConfig::rows`] scales them
/// for row-based hosts.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigatorConfig {
    /// Reset the document scroll position to the top on startup
    pub reset_scroll: bool,
    /// Smooth-scroll animation duration in milliseconds
    pub scroll_duration_ms: u64,
    /// Clearance kept above a heading when click-scrolling to it
    pub header_clearance: f64,
    /// Lead-in added to the scroll position when probing for the active
    /// section
    pub probe_buffer: f64,
    /// Clearance the nav widget keeps above the footer
    pub footer_clearance: f64,
    /// Slack when deciding the viewport has reached the document end
    pub bottom_slack: f64,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            reset_scroll: false,
            scroll_duration_ms: nav::SCROLL_DURATION.as_millis() as u64,
            header_clearance: nav::HEADER_CLEARANCE,
            probe_buffer: nav::PROBE_BUFFER,
            footer_clearance: nav::FOOTER_CLEARANCE,
            bottom_slack: nav::BOTTOM_SLACK,
        }
    }
}

impl NavigatorConfig {
    /// Defaults for hosts that measure in terminal rows.
    pub fn rows() -> Self {
        Self {
            header_clearance: 1.0,
            probe_buffer: 2.0,
            footer_clearance: 1.0,
            bottom_slack: 1.0,
            ..Self::default()
        }
    }

    pub fn scroll_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_duration_ms)
    }
}

/// Navigator fields as they appear in the config file: only what the user
/// actually set, so partial tables overlay the host's defaults instead of
/// resetting the rest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NavigatorOverrides {
    pub reset_scroll: Option<bool>,
    pub scroll_duration_ms: Option<u64>,
    pub header_clearance: Option<f64>,
    pub probe_buffer: Option<f64>,
    pub footer_clearance: Option<f64>,
    pub bottom_slack: Option<f64>,
}

impl NavigatorOverrides {
    pub fn apply(&self, base: NavigatorConfig) -> NavigatorConfig {
        NavigatorConfig {
            reset_scroll: self.reset_scroll.unwrap_or(base.reset_scroll),
            scroll_duration_ms: self.scroll_duration_ms.unwrap_or(base.scroll_duration_ms),
            header_clearance: self.header_clearance.unwrap_or(base.header_clearance),
            probe_buffer: self.probe_buffer.unwrap_or(base.probe_buffer),
            footer_clearance: self.footer_clearance.unwrap_or(base.footer_clearance),
            bottom_slack: self.bottom_slack.unwrap_or(base.bottom_slack),
        }
    }
}

/// Contents of the viewer's config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Theme name
    pub theme: Option<String>,
    /// Never show the outline sidebar
    pub hide_outline: bool,
    /// Navigator tunables (`[navigator]` table)
    pub navigator: NavigatorOverrides,
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the default location. A missing file yields the defaults;
    /// an unreadable or malformed file is logged and ignored, since the
    /// viewer must come up regardless.
    pub fn load_or_default() -> Self {
        let path = paths::config_file();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Resolve the navigator config for a row-based host.
    pub fn navigator_config(&self) -> NavigatorConfig {
        self.navigator.apply(NavigatorConfig::rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_preserve_tuned_values() {
        let config = NavigatorConfig::default();
        assert!(!config.reset_scroll);
        assert_eq!(config.scroll_duration(), Duration::from_millis(500));
        assert_eq!(config.header_clearance, 80.0);
        assert_eq!(config.probe_buffer, 24.0);
        assert_eq!(config.footer_clearance, 32.0);
        assert_eq!(config.bottom_slack, 5.0);
    }

    #[test]
    fn test_partial_overlay_keeps_row_defaults() {
        let config: ViewerConfig = toml::from_str(
            r#"
            theme = "paper"

            [navigator]
            scroll_duration_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.theme.as_deref(), Some("paper"));

        let resolved = config.navigator_config();
        assert_eq!(resolved.scroll_duration_ms, 250);
        assert_eq!(resolved.probe_buffer, NavigatorConfig::rows().probe_buffer);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hide_outline = true").unwrap();

        let config = ViewerConfig::load(file.path()).unwrap();
        assert!(config.hide_outline);
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme = [not toml").unwrap();

        assert!(matches!(
            ViewerConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
