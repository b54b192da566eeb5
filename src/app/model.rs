// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/model.rs
//
// The engine model: owns all mutable selection state and dispatches
// collaborator events through the drag state machine.

use anyhow::anyhow;

use crate::app::message::EngineMessage;
use crate::app::metrics::{LayoutProbe, MetricsTracker};
use crate::app::overlay::{OverlayFrame, SELECTION_STYLE};
use crate::config::EngineConfig;
use crate::domain::geometry::{self, DisplayMetrics, DisplayRect};
use crate::domain::selection::SelectionSet;
use crate::render::{self, RenderedCrop, SourceImage};

/// The selection-and-crop engine.
///
/// Single-owner, synchronous state: all transitions run on the caller's
/// thread in response to one message at a time. The probe is the layout
/// collaborator that reports where the image currently renders.
pub struct Engine<P: LayoutProbe> {
    config: EngineConfig,
    probe: P,
    source: Option<SourceImage>,
    metrics: MetricsTracker,
    selection: SelectionSet,
}

impl<P: LayoutProbe> Engine<P> {
    pub fn new(config: EngineConfig, probe: P) -> Self {
        Self {
            config,
            probe,
            source: None,
            metrics: MetricsTracker::new(),
            selection: SelectionSet::new(config.min_drag_size),
        }
    }

    /// Apply one event. Returns whether the overlay must repaint.
    pub fn update(&mut self, message: EngineMessage) -> bool {
        match message {
            EngineMessage::ImageLoaded(source) => {
                self.source = Some(source);
                self.refresh_metrics();
                true
            }

            EngineMessage::ViewportResized => {
                // Stored rectangles are image-relative and survive the
                // resize untouched; only the metrics snapshot moves.
                self.refresh_metrics();
                true
            }

            EngineMessage::PointerPressed { page_x, page_y } => {
                let metrics = self.metrics.current();
                if !metrics.is_ready() {
                    // No image laid out yet; not a fault, just nothing to
                    // select against.
                    return false;
                }
                let point = geometry::pointer_to_display(page_x, page_y, &metrics);
                self.selection.begin_drag(point);
                true
            }

            EngineMessage::PointerMoved { page_x, page_y } => {
                if !self.selection.is_dragging() {
                    return false;
                }
                let metrics = self.metrics.current();
                let point = geometry::pointer_to_display(page_x, page_y, &metrics);
                self.selection.update_drag(point);
                true
            }

            EngineMessage::PointerReleased { page_x, page_y } => {
                if !self.selection.is_dragging() {
                    return false;
                }
                let metrics = self.metrics.current();
                let point = geometry::pointer_to_display(page_x, page_y, &metrics);
                self.selection.end_drag(point);
                // The candidate disappears either way.
                true
            }

            EngineMessage::RemoveSelection(index) => self.selection.remove(index),
        }
    }

    /// Re-read the rendered image box; stale snapshot survives a miss.
    fn refresh_metrics(&mut self) -> bool {
        let natural = self.source.as_ref().map(SourceImage::dimensions);
        self.metrics.refresh(&self.probe, natural)
    }

    /// The geometry and style the rendering collaborator draws this frame.
    #[must_use]
    pub fn overlay_frame(&self) -> OverlayFrame {
        OverlayFrame {
            committed: self.selection.committed().iter().copied().map(Into::into).collect(),
            candidate: self.selection.candidate().map(Into::into),
            style: SELECTION_STYLE,
        }
    }

    /// The committed rectangles, in commit (= export) order.
    #[must_use]
    pub fn committed(&self) -> &[DisplayRect] {
        self.selection.committed()
    }

    /// The latest metrics snapshot.
    #[must_use]
    pub fn metrics(&self) -> DisplayMetrics {
        self.metrics.current()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.selection.is_dragging()
    }

    /// Render the committed selection at `index` against the current
    /// metrics, for a single-crop preview or download.
    ///
    /// `None` when the index is out of range or no image is laid out.
    #[must_use]
    pub fn rendered_crop(&self, index: usize) -> Option<RenderedCrop> {
        let source = self.source.as_ref()?;
        let rect = *self.selection.committed().get(index)?;
        render::render_crop(source, rect, &self.metrics.current(), self.config.resample_filter)
    }

    /// Render every committed selection for an export, in commit order.
    ///
    /// Reads an immutable snapshot of rectangles and metrics, so gestures or
    /// resizes racing a pending export cannot corrupt it. With no image laid
    /// out the result is empty. A selection that no longer maps onto the
    /// image aborts the whole set rather than silently dropping an entry.
    pub fn rendered_crops(&self) -> anyhow::Result<Vec<RenderedCrop>> {
        let Some(source) = self.source.as_ref() else {
            return Ok(Vec::new());
        };
        let metrics = self.metrics.current();
        if !metrics.is_ready() {
            return Ok(Vec::new());
        }

        let rects = self.selection.snapshot();
        let mut crops = Vec::with_capacity(rects.len());
        for (index, rect) in rects.into_iter().enumerate() {
            let crop = render::render_crop(source, rect, &metrics, self.config.resample_filter)
                .ok_or_else(|| anyhow!("selection {} lies outside the image", index + 1))?;
            crops.push(crop);
        }
        Ok(crops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::metrics::RenderedBox;
    use image::{DynamicImage, RgbaImage};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Probe whose reported box the test can move between refreshes.
    #[derive(Clone, Default)]
    struct TestProbe(Rc<Cell<Option<RenderedBox>>>);

    impl LayoutProbe for TestProbe {
        fn rendered_box(&self) -> Option<RenderedBox> {
            self.0.get()
        }
    }

    fn boxed(left: f64, top: f64, width: f64, height: f64) -> Option<RenderedBox> {
        Some(RenderedBox {
            left,
            top,
            width,
            height,
        })
    }

    fn blank_source(width: u32, height: u32) -> SourceImage {
        SourceImage::from_image(DynamicImage::ImageRgba8(RgbaImage::new(width, height)))
    }

    fn engine_with_image() -> (Engine<TestProbe>, TestProbe) {
        let probe = TestProbe::default();
        probe.0.set(boxed(100.0, 50.0, 400.0, 300.0));

        let mut engine = Engine::new(EngineConfig::default(), probe.clone());
        assert!(engine.update(EngineMessage::ImageLoaded(blank_source(800, 600))));
        (engine, probe)
    }

    fn drag(engine: &mut Engine<TestProbe>, from: (f64, f64), to: (f64, f64)) {
        engine.update(EngineMessage::PointerPressed {
            page_x: from.0,
            page_y: from.1,
        });
        engine.update(EngineMessage::PointerMoved {
            page_x: to.0,
            page_y: to.1,
        });
        engine.update(EngineMessage::PointerReleased {
            page_x: to.0,
            page_y: to.1,
        });
    }

    #[test]
    fn gesture_commits_image_relative_rect() {
        let (mut engine, _probe) = engine_with_image();

        // Page (150, 90) over an image at (100, 50) is display (50, 40).
        drag(&mut engine, (150.0, 90.0), (250.0, 190.0));

        assert_eq!(
            engine.committed(),
            &[DisplayRect::new(50.0, 40.0, 100.0, 100.0)]
        );
    }

    #[test]
    fn pointer_ignored_before_image_loads() {
        let mut engine = Engine::new(EngineConfig::default(), TestProbe::default());

        assert!(!engine.update(EngineMessage::PointerPressed {
            page_x: 10.0,
            page_y: 10.0,
        }));
        assert!(!engine.is_dragging());
        assert!(engine.committed().is_empty());
    }

    #[test]
    fn resize_keeps_rects_but_moves_crop_region() {
        let (mut engine, probe) = engine_with_image();
        drag(&mut engine, (150.0, 90.0), (250.0, 190.0));
        let rect = engine.committed()[0];

        let before = geometry::to_crop_region(rect, &engine.metrics()).unwrap();

        // Image re-laid-out at half the rendered size.
        probe.0.set(boxed(100.0, 50.0, 200.0, 150.0));
        assert!(engine.update(EngineMessage::ViewportResized));

        assert_eq!(engine.committed(), &[rect]);
        let after = geometry::to_crop_region(rect, &engine.metrics()).unwrap();
        assert_eq!(after.width, before.width * 2.0);
        assert_eq!(after.height, before.height * 2.0);
    }

    #[test]
    fn overlay_frame_tracks_candidate_and_committed() {
        let (mut engine, _probe) = engine_with_image();
        drag(&mut engine, (150.0, 90.0), (250.0, 190.0));

        engine.update(EngineMessage::PointerPressed {
            page_x: 300.0,
            page_y: 200.0,
        });
        engine.update(EngineMessage::PointerMoved {
            page_x: 320.0,
            page_y: 230.0,
        });

        let frame = engine.overlay_frame();
        assert_eq!(frame.committed.len(), 1);
        let candidate = frame.candidate.unwrap();
        assert_eq!((candidate.x, candidate.y), (200.0, 150.0));
        assert_eq!((candidate.width, candidate.height), (20.0, 30.0));
    }

    #[test]
    fn rendered_crops_cover_every_committed_rect() {
        let (mut engine, _probe) = engine_with_image();
        drag(&mut engine, (150.0, 90.0), (250.0, 190.0));
        drag(&mut engine, (200.0, 100.0), (280.0, 160.0));

        let crops = engine.rendered_crops().unwrap();
        assert_eq!(crops.len(), 2);
        assert_eq!((crops[0].width(), crops[0].height()), (100, 100));
        assert_eq!((crops[1].width(), crops[1].height()), (80, 60));
    }

    #[test]
    fn rendered_crops_empty_without_image() {
        let engine = Engine::new(EngineConfig::default(), TestProbe::default());
        assert!(engine.rendered_crops().unwrap().is_empty());
    }

    #[test]
    fn rendered_crops_abort_when_a_rect_misses_the_image() {
        let (mut engine, probe) = engine_with_image();
        drag(&mut engine, (150.0, 90.0), (250.0, 190.0));

        // Shrink the rendered box far enough that the stored rect now maps
        // past the natural bounds.
        probe.0.set(boxed(100.0, 50.0, 40.0, 30.0));
        engine.update(EngineMessage::ViewportResized);

        assert!(engine.rendered_crops().is_err());
    }

    #[test]
    fn removal_is_noop_out_of_range() {
        let (mut engine, _probe) = engine_with_image();
        drag(&mut engine, (150.0, 90.0), (250.0, 190.0));

        assert!(!engine.update(EngineMessage::RemoveSelection(5)));
        assert_eq!(engine.committed().len(), 1);
        assert!(engine.update(EngineMessage::RemoveSelection(0)));
        assert!(engine.committed().is_empty());
    }
}
