//! Document geometry tracking
//!
//! Snapshots the measurements the scroll spy works from: header height,
//! viewport height, total document height, and the absolute top offset of
//! every entry's target heading. Offsets are always read from the live
//! layout rather than cached layout math, since a reflow can move true
//! positions independently of any model. Re-measured on resize-equivalent
//! events only, never on scroll.

use crate::entries::NavEntries;

/// Live document measurements, in whatever vertical unit the host uses.
pub trait DocumentLayout {
    /// Height of the fixed header overlaying the document, 0 when absent.
    fn header_height(&self) -> f64;

    fn viewport_height(&self) -> f64;

    fn document_height(&self) -> f64;

    /// Absolute top offset of the heading with the given id, or `None`
    /// when the heading no longer exists in the layout.
    fn heading_top(&self, id: &str) -> Option<f64>;
}

/// Cached offset of one entry's target heading.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOffset {
    /// Index into the entry list
    pub entry: usize,
    /// Absolute document offset of the heading top
    pub top: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub header_height: f64,
    pub viewport_height: f64,
    pub document_height: f64,
    /// Per-entry offsets in document order. Entries whose heading has
    /// vanished from the layout are simply absent.
    pub offsets: Vec<SectionOffset>,
}

impl Geometry {
    pub fn measure(entries: &NavEntries, layout: &impl DocumentLayout) -> Self {
        let offsets = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                layout
                    .heading_top(&entry.id)
                    .map(|top| SectionOffset { entry: index, top })
            })
            .collect();

        Self {
            header_height: layout.header_height(),
            viewport_height: layout.viewport_height(),
            document_height: layout.document_height(),
            offsets,
        }
    }

    /// Offset cached for an entry, if its heading was found.
    pub fn offset_of(&self, entry: usize) -> Option<f64> {
        self.offsets
            .iter()
            .find(|offset| offset.entry == entry)
            .map(|offset| offset.top)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::outline::Outline;
    use std::collections::HashMap;

    /// Fixed-value layout used across the engine's test suites.
    pub(crate) struct FakeLayout {
        pub header: f64,
        pub viewport: f64,
        pub height: f64,
        pub tops: HashMap<String, f64>,
    }

    impl FakeLayout {
        pub fn new(header: f64, viewport: f64, height: f64, tops: &[(&str, f64)]) -> Self {
            Self {
                header,
                viewport,
                height,
                tops: tops
                    .iter()
                    .map(|(id, top)| (id.to_string(), *top))
                    .collect(),
            }
        }
    }

    impl DocumentLayout for FakeLayout {
        fn header_height(&self) -> f64 {
            self.header
        }
        fn viewport_height(&self) -> f64 {
            self.viewport
        }
        fn document_height(&self) -> f64 {
            self.height
        }
        fn heading_top(&self, id: &str) -> Option<f64> {
            self.tops.get(id).copied()
        }
    }

    fn entries() -> NavEntries {
        NavEntries::from_outline(&Outline::parse("# A\n\n## A1\n\n# B\n"))
    }

    #[test]
    fn test_measure_reads_every_heading() {
        let layout = FakeLayout::new(
            2.0,
            40.0,
            200.0,
            &[
                ("nav-title-1", 0.0),
                ("nav-title-1-1", 12.0),
                ("nav-title-2", 90.0),
            ],
        );
        let geometry = Geometry::measure(&entries(), &layout);

        assert_eq!(geometry.header_height, 2.0);
        assert_eq!(geometry.viewport_height, 40.0);
        assert_eq!(geometry.document_height, 200.0);
        assert_eq!(geometry.offsets.len(), 3);
        assert_eq!(geometry.offset_of(1), Some(12.0));
    }

    #[test]
    fn test_vanished_heading_is_dropped() {
        let layout = FakeLayout::new(
            0.0,
            40.0,
            200.0,
            &[("nav-title-1", 0.0), ("nav-title-2", 90.0)],
        );
        let geometry = Geometry::measure(&entries(), &layout);

        assert_eq!(geometry.offsets.len(), 2);
        assert_eq!(geometry.offset_of(1), None);
        // Document order of the survivors is preserved
        assert_eq!(geometry.offsets[0].entry, 0);
        assert_eq!(geometry.offsets[1].entry, 2);
    }
}
