//! Active-entry computation
//!
//! Decides which entry the viewport is currently "in". The top and bottom
//! of the document get explicit rules; everywhere else a probe line just
//! below the header is tested against the cached offsets with last match
//! winning, so a section becomes active as soon as its heading top crosses
//! the probe line.

use crate::config::NavigatorConfig;
use crate::geometry::Geometry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpyOutcome {
    /// Entry index to activate
    pub entry: usize,
    /// The bottom-of-document rule fired: the nav widget should scroll its
    /// own container to the end so the last entry stays in view.
    pub nav_to_end: bool,
}

/// `None` only when no offsets are cached (nothing measured yet, or every
/// heading vanished from the layout).
pub fn compute_active(
    scroll_y: f64,
    geometry: &Geometry,
    config: &NavigatorConfig,
) -> Option<SpyOutcome> {
    let first = geometry.offsets.first()?;
    let last = geometry.offsets.last()?;

    if scroll_y <= 0.0 {
        return Some(SpyOutcome {
            entry: first.entry,
            nav_to_end: false,
        });
    }

    if scroll_y + geometry.viewport_height >= geometry.document_height - config.bottom_slack {
        return Some(SpyOutcome {
            entry: last.entry,
            nav_to_end: true,
        });
    }

    let probe = scroll_y + geometry.header_height + config.probe_buffer;
    let entry = geometry
        .offsets
        .iter()
        .rev()
        .find(|offset| offset.top <= probe)
        .map_or(first.entry, |offset| offset.entry);

    Some(SpyOutcome {
        entry,
        nav_to_end: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SectionOffset;

    fn geometry(offsets: &[f64], viewport: f64, height: f64, header: f64) -> Geometry {
        Geometry {
            header_height: header,
            viewport_height: viewport,
            document_height: height,
            offsets: offsets
                .iter()
                .enumerate()
                .map(|(entry, top)| SectionOffset { entry, top: *top })
                .collect(),
        }
    }

    fn config(probe_buffer: f64, bottom_slack: f64) -> NavigatorConfig {
        NavigatorConfig {
            probe_buffer,
            bottom_slack,
            ..NavigatorConfig::default()
        }
    }

    #[test]
    fn test_top_of_page_rule() {
        let geometry = geometry(&[50.0, 100.0, 300.0], 80.0, 1000.0, 0.0);
        let outcome = compute_active(0.0, &geometry, &config(24.0, 5.0)).unwrap();
        assert_eq!(outcome.entry, 0);
        assert!(!outcome.nav_to_end);
    }

    #[test]
    fn test_bottom_of_page_rule() {
        let geometry = geometry(&[0.0, 100.0, 300.0], 80.0, 1000.0, 0.0);
        // 917 + 80 = 997 >= 1000 - 5
        let outcome = compute_active(917.0, &geometry, &config(24.0, 5.0)).unwrap();
        assert_eq!(outcome.entry, 2);
        assert!(outcome.nav_to_end);

        // One unit shy of the slack window falls through to the probe scan
        let outcome = compute_active(914.0, &geometry, &config(24.0, 5.0)).unwrap();
        assert!(!outcome.nav_to_end);
    }

    #[test]
    fn test_last_match_wins_scan() {
        let geometry = geometry(&[0.0, 100.0, 300.0], 80.0, 10_000.0, 0.0);
        let config = config(0.0, 5.0);

        // probe = scroll_y here (no header, no buffer)
        let at = |probe: f64| compute_active(probe, &geometry, &config).unwrap().entry;
        assert_eq!(at(150.0), 1);
        assert_eq!(at(300.0), 2);
        assert_eq!(at(50.0), 0);
    }

    #[test]
    fn test_probe_above_first_offset_falls_back_to_first() {
        let geometry = geometry(&[500.0, 800.0], 80.0, 10_000.0, 0.0);
        let outcome = compute_active(10.0, &geometry, &config(24.0, 5.0)).unwrap();
        assert_eq!(outcome.entry, 0);
    }

    #[test]
    fn test_no_offsets_yields_none() {
        let geometry = geometry(&[], 80.0, 1000.0, 0.0);
        assert!(compute_active(100.0, &geometry, &config(24.0, 5.0)).is_none());
    }

    #[test]
    fn test_documented_scenario() {
        // Headings "Intro", "Background", "History" at 0 / 1000 / 1100,
        // viewport 800, document 2000, header 0, buffer 24. At scroll 950
        // the probe sits at 974, short of Background's 1000, so Intro is
        // still the active section.
        let geometry = geometry(&[0.0, 1000.0, 1100.0], 800.0, 2000.0, 0.0);
        let outcome = compute_active(950.0, &geometry, &config(24.0, 5.0)).unwrap();
        assert_eq!(outcome.entry, 0);

        // A little further and Background takes over
        let outcome = compute_active(976.0, &geometry, &config(24.0, 5.0)).unwrap();
        assert_eq!(outcome.entry, 1);
    }

    #[test]
    fn test_header_height_feeds_the_probe() {
        let geometry = geometry(&[0.0, 100.0], 50.0, 10_000.0, 30.0);
        // scroll 60 + header 30 + buffer 24 = probe 114
        let outcome = compute_active(60.0, &geometry, &config(24.0, 5.0)).unwrap();
        assert_eq!(outcome.entry, 1);
    }
}
