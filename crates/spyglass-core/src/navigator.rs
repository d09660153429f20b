//! The navigator controller
//!
//! One instantiable object owning the entry list, cached geometry, active
//! state, and the scroll animation. The host drives it with raw scroll
//! notifications, resize remeasures, clicks, and a once-per-frame tick,
//! then applies the effects it emits. A burst of scroll events yields at
//! most one active-state computation per frame; synchronous per-event
//! layout work stays in the host.

use std::time::Instant;

use crate::activation::{Activation, ActivationController, NavWidget};
use crate::config::NavigatorConfig;
use crate::entries::NavEntries;
use crate::geometry::{DocumentLayout, Geometry};
use crate::outline::Outline;
use crate::scroller::SmoothScroller;
use crate::spy;

/// State change for the host to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEffect {
    /// Set the document scroll position (smooth-scroll frame)
    ScrollTo { position: f64 },
    /// A click-initiated scroll reached its target; move focus to this
    /// entry's heading without scrolling any further
    ScrollFinished { entry: usize },
    /// The active entry changed
    ActiveChanged(Activation),
    /// Bottom-of-document rule: scroll the nav widget to its end
    NavScrollToEnd,
}

pub struct Navigator {
    entries: NavEntries,
    config: NavigatorConfig,
    geometry: Geometry,
    activation: ActivationController,
    scroller: SmoothScroller,
    scroll_y: f64,
    spy_pending: bool,
    reset_pending: bool,
    scroll_target: Option<usize>,
}

impl Navigator {
    /// Build a navigator for a document's outline. `None` when the outline
    /// yields no usable entries; the host should not mount the nav widget
    /// at all.
    pub fn new(outline: &Outline, config: NavigatorConfig) -> Option<Self> {
        let entries = NavEntries::from_outline(outline);
        if entries.is_empty() {
            return None;
        }
        tracing::debug!(entries = entries.len(), "navigator created");

        let reset_pending = config.reset_scroll;
        Some(Self {
            entries,
            config,
            geometry: Geometry::default(),
            activation: ActivationController::new(),
            scroller: SmoothScroller::new(),
            scroll_y: 0.0,
            spy_pending: false,
            reset_pending,
            scroll_target: None,
        })
    }

    pub fn entries(&self) -> &NavEntries {
        &self.entries
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn activation(&self) -> &ActivationController {
        &self.activation
    }

    pub fn scroll_position(&self) -> f64 {
        self.scroll_y
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroller.is_animating()
    }

    /// Rebuild geometry from the live layout and queue an active-state
    /// pass. Call on resize-equivalent events, never on scroll.
    pub fn remeasure(&mut self, layout: &impl DocumentLayout) {
        self.geometry = Geometry::measure(&self.entries, layout);
        self.spy_pending = true;
    }

    /// Record a new scroll position. The active-state pass is deferred to
    /// the next frame and coalesced.
    pub fn note_scroll(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
        self.spy_pending = true;
    }

    /// Cancel any in-flight click scroll (the user took over).
    pub fn interrupt_scroll(&mut self) {
        if self.scroller.cancel() {
            self.scroll_target = None;
        }
    }

    /// Click navigation: smooth-scroll the document so the entry's heading
    /// sits just below the header. Returns `false` when the entry's heading
    /// is missing from the current geometry.
    pub fn navigate_to(&mut self, entry: usize, now: Instant) -> bool {
        let Some(top) = self.geometry.offset_of(entry) else {
            return false;
        };
        let max_scroll = (self.geometry.document_height - self.geometry.viewport_height).max(0.0);
        let target = (top - self.config.header_clearance).clamp(0.0, max_scroll);

        self.scroller
            .start(self.scroll_y, target, now, self.config.scroll_duration());
        self.scroll_target = Some(entry);
        true
    }

    pub fn navigate_to_id(&mut self, id: &str, now: Instant) -> bool {
        match self.entries.index_of(id) {
            Some(index) => self.navigate_to(index, now),
            None => false,
        }
    }

    /// Per-frame tick: advance the animation and run a pending active-state
    /// pass, emitting effects for the host to apply in order.
    pub fn on_frame(&mut self, now: Instant, nav: &impl NavWidget) -> Vec<NavEffect> {
        let mut effects = Vec::new();

        if self.reset_pending {
            self.reset_pending = false;
            self.scroll_y = 0.0;
            self.spy_pending = true;
            effects.push(NavEffect::ScrollTo { position: 0.0 });
        }

        if let Some(frame) = self.scroller.tick(now) {
            self.scroll_y = frame.position;
            self.spy_pending = true;
            effects.push(NavEffect::ScrollTo {
                position: frame.position,
            });
            if frame.done {
                if let Some(entry) = self.scroll_target.take() {
                    effects.push(NavEffect::ScrollFinished { entry });
                }
            }
        }

        if self.spy_pending {
            self.spy_pending = false;
            if let Some(outcome) = spy::compute_active(self.scroll_y, &self.geometry, &self.config)
            {
                if let Some(activation) =
                    self.activation.activate(outcome.entry, &self.entries, nav)
                {
                    effects.push(NavEffect::ActiveChanged(activation));
                }
                // After ActiveChanged, so the end scroll wins over the
                // nearest-edge adjustment
                if outcome.nav_to_end {
                    effects.push(NavEffect::NavScrollToEnd);
                }
            }
        }

        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tests::FakeLayout;
    use std::time::Duration;

    struct FlatNav {
        rows: usize,
    }

    impl NavWidget for FlatNav {
        fn entry_bounds(&self, entry: usize) -> Option<(f64, f64)> {
            (entry < self.rows).then(|| (entry as f64, 1.0))
        }
        fn scroll_viewport(&self) -> (f64, f64) {
            (0.0, 50.0)
        }
    }

    fn navigator(config: NavigatorConfig) -> Navigator {
        let outline = Outline::parse("# Intro\n\n# Background\n\n## History\n");
        Navigator::new(&outline, config).unwrap()
    }

    fn layout() -> FakeLayout {
        FakeLayout::new(
            0.0,
            800.0,
            2000.0,
            &[
                ("nav-title-1", 0.0),
                ("nav-title-2", 1000.0),
                ("nav-title-2-1", 1100.0),
            ],
        )
    }

    fn rows_config() -> NavigatorConfig {
        NavigatorConfig {
            probe_buffer: 24.0,
            bottom_slack: 5.0,
            header_clearance: 80.0,
            ..NavigatorConfig::default()
        }
    }

    #[test]
    fn test_empty_outline_yields_no_navigator() {
        let outline = Outline::parse("no headings here\n");
        assert!(Navigator::new(&outline, NavigatorConfig::default()).is_none());
    }

    #[test]
    fn test_first_entry_active_after_first_measure() {
        let mut nav = navigator(rows_config());
        nav.remeasure(&layout());

        let effects = nav.on_frame(Instant::now(), &FlatNav { rows: 3 });
        assert!(effects.iter().any(|e| matches!(
            e,
            NavEffect::ActiveChanged(activation) if activation.entry == 0
        )));
        assert_eq!(nav.activation().active(), Some(0));
    }

    #[test]
    fn test_scroll_burst_coalesces_to_one_pass() {
        let mut nav = navigator(rows_config());
        nav.remeasure(&layout());
        let widget = FlatNav { rows: 3 };
        nav.on_frame(Instant::now(), &widget);

        // A burst of raw scroll events between frames
        for y in [120.0, 480.0, 950.0, 1040.0] {
            nav.note_scroll(y);
        }

        let effects = nav.on_frame(Instant::now(), &widget);
        let changes = effects
            .iter()
            .filter(|e| matches!(e, NavEffect::ActiveChanged(_)))
            .count();
        assert_eq!(changes, 1);
        // Only the final position counted: probe 1064 lands on Background
        assert_eq!(nav.activation().active(), Some(1));

        // Nothing pending: the next frame is quiet
        assert!(nav.on_frame(Instant::now(), &widget).is_empty());
    }

    #[test]
    fn test_click_navigation_scrolls_and_reports_focus() {
        let mut nav = navigator(rows_config());
        nav.remeasure(&layout());
        let widget = FlatNav { rows: 3 };
        let start = Instant::now();
        nav.on_frame(start, &widget);

        assert!(nav.navigate_to(1, start));
        assert!(nav.is_scrolling());

        // Mid-flight frames move the scroll position monotonically here
        let mid = nav.on_frame(start + Duration::from_millis(250), &widget);
        assert!(mid
            .iter()
            .any(|e| matches!(e, NavEffect::ScrollTo { position } if *position > 0.0)));

        let done = nav.on_frame(start + Duration::from_millis(600), &widget);
        assert!(done
            .iter()
            .any(|e| matches!(e, NavEffect::ScrollTo { position } if *position == 920.0)));
        assert!(done
            .iter()
            .any(|e| matches!(e, NavEffect::ScrollFinished { entry: 1 })));
        assert!(!nav.is_scrolling());
    }

    #[test]
    fn test_navigate_to_missing_heading_is_refused() {
        let mut nav = navigator(rows_config());
        let sparse = FakeLayout::new(0.0, 800.0, 2000.0, &[("nav-title-1", 0.0)]);
        nav.remeasure(&sparse);

        assert!(!nav.navigate_to(1, Instant::now()));
        assert!(!nav.is_scrolling());
    }

    #[test]
    fn test_interrupt_scroll_cancels_click_navigation() {
        let mut nav = navigator(rows_config());
        nav.remeasure(&layout());
        let widget = FlatNav { rows: 3 };
        let start = Instant::now();

        nav.navigate_to(2, start);
        nav.interrupt_scroll();
        nav.note_scroll(40.0);

        let effects = nav.on_frame(start + Duration::from_millis(600), &widget);
        assert!(!effects
            .iter()
            .any(|e| matches!(e, NavEffect::ScrollFinished { .. })));
        assert!(!effects
            .iter()
            .any(|e| matches!(e, NavEffect::ScrollTo { .. })));
    }

    #[test]
    fn test_bottom_rule_emits_nav_scroll_to_end() {
        let mut nav = navigator(rows_config());
        nav.remeasure(&layout());
        let widget = FlatNav { rows: 3 };
        nav.on_frame(Instant::now(), &widget);

        nav.note_scroll(1200.0); // 1200 + 800 >= 2000 - 5
        let effects = nav.on_frame(Instant::now(), &widget);
        assert!(effects.iter().any(|e| matches!(e, NavEffect::NavScrollToEnd)));
        assert_eq!(nav.activation().active(), Some(2));
    }

    #[test]
    fn test_reset_scroll_fires_once_on_startup() {
        let config = NavigatorConfig {
            reset_scroll: true,
            ..rows_config()
        };
        let mut nav = navigator(config);
        nav.remeasure(&layout());
        let widget = FlatNav { rows: 3 };

        let effects = nav.on_frame(Instant::now(), &widget);
        assert!(effects
            .iter()
            .any(|e| matches!(e, NavEffect::ScrollTo { position } if *position == 0.0)));

        let effects = nav.on_frame(Instant::now(), &widget);
        assert!(!effects
            .iter()
            .any(|e| matches!(e, NavEffect::ScrollTo { .. })));
    }
}
