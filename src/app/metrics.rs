// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/metrics.rs
//
// Display metrics tracker: keeps the metrics snapshot in sync with the
// rendered image across loads and viewport resizes.

use crate::domain::geometry::DisplayMetrics;

/// On-screen box of the rendered image, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Read side of the presentation layout.
///
/// The collaborator that actually renders the image reports where it
/// currently sits. `None` means there is nothing rendered right now (no
/// image, or the element is mid-teardown during a resize).
pub trait LayoutProbe {
    fn rendered_box(&self) -> Option<RenderedBox>;
}

/// Holds the latest [`DisplayMetrics`] snapshot.
///
/// Refreshed only on its two triggers (image load, viewport resize), never
/// polled. Consumers must read the snapshot at the moment of use; a captured
/// copy goes stale as soon as the next refresh lands.
#[derive(Debug, Default)]
pub struct MetricsTracker {
    current: DisplayMetrics,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the snapshot from the probe and the image's natural size.
    ///
    /// A probe that finds no rendered image keeps the stale snapshot in
    /// place until the next successful refresh. Returns whether a new
    /// snapshot was published.
    pub fn refresh(&mut self, probe: &dyn LayoutProbe, natural: Option<(u32, u32)>) -> bool {
        let Some(rendered) = probe.rendered_box() else {
            log::debug!("metrics refresh found no rendered image; keeping stale snapshot");
            return false;
        };

        let (natural_width, natural_height) = match natural {
            Some((w, h)) => (f64::from(w), f64::from(h)),
            None => (0.0, 0.0),
        };

        self.current = DisplayMetrics {
            image_left: rendered.left,
            image_top: rendered.top,
            rendered_width: rendered.width,
            rendered_height: rendered.height,
            natural_width,
            natural_height,
        };
        true
    }

    /// The latest snapshot. All zero until the first successful refresh.
    #[must_use]
    pub fn current(&self) -> DisplayMetrics {
        self.current
    }
}
