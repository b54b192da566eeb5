// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/geometry.rs
//
// Coordinate spaces and the pure mapping between them.
//
// Two spaces are in play: display space (where the image is rendered and the
// pointer moves) and natural space (the pixel grid of the decoded image).
// Everything here is a pure derivation from the latest metrics snapshot;
// nothing is cached, because the ratios are only valid for the instant the
// snapshot was taken.

/// A pointer position in display space, relative to the rendered image's
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayPoint {
    pub x: f64,
    pub y: f64,
}

impl DisplayPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// =============================================================================
// Display metrics
// =============================================================================

/// Snapshot of where and how large the image currently renders.
///
/// `rendered_*` is the on-screen box, `natural_*` the decoded pixel grid.
/// All zero until an image has loaded; consumers must check [`is_ready`]
/// before deriving anything from it.
///
/// [`is_ready`]: DisplayMetrics::is_ready
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayMetrics {
    /// Display-space origin of the rendered image.
    pub image_left: f64,
    pub image_top: f64,
    /// On-screen size of the rendered image.
    pub rendered_width: f64,
    pub rendered_height: f64,
    /// Pixel size of the decoded image.
    pub natural_width: f64,
    pub natural_height: f64,
}

impl DisplayMetrics {
    /// Whether an image has been laid out with a usable rendered size.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.rendered_width > 0.0 && self.rendered_height > 0.0
    }

    /// Natural pixels per display pixel, horizontally.
    ///
    /// Only meaningful when [`is_ready`](DisplayMetrics::is_ready) holds.
    #[must_use]
    pub fn width_ratio(&self) -> f64 {
        self.natural_width / self.rendered_width
    }

    /// Natural pixels per display pixel, vertically.
    #[must_use]
    pub fn height_ratio(&self) -> f64 {
        self.natural_height / self.rendered_height
    }
}

// =============================================================================
// Rectangles
// =============================================================================

/// A rectangle in display space, relative to the rendered image's top-left.
///
/// Committed rectangles always have positive size; only the in-progress
/// candidate may carry a negative width or height while the pointer sits
/// left or above its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle spanning two opposite corners, normalized to positive size.
    #[must_use]
    pub fn from_corners(a: DisplayPoint, b: DisplayPoint) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// Check if the rectangle has positive dimensions.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Crop region in natural-image space.
///
/// Derived on demand from a [`DisplayRect`] and the current metrics; never
/// stored, because the ratios change whenever the image is re-laid-out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    /// Snap to whole pixels, clamped to the image bounds.
    ///
    /// Returns `None` when the region lies outside the image or collapses to
    /// zero size after clamping.
    #[must_use]
    pub fn to_pixel_rect(&self, natural_width: u32, natural_height: u32) -> Option<PixelRect> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let x = self.x.max(0.0) as u32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let y = self.y.max(0.0) as u32;

        if x >= natural_width || y >= natural_height {
            return None;
        }

        // Clamp dimensions to what remains of the image.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let width = (self.width.max(0.0) as u32).min(natural_width - x);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let height = (self.height.max(0.0) as u32).min(natural_height - y);

        if width == 0 || height == 0 {
            return None;
        }

        Some(PixelRect {
            x,
            y,
            width,
            height,
        })
    }
}

/// A whole-pixel rectangle inside the natural image bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

// =============================================================================
// Mapping operations
// =============================================================================

/// Normalize a raw page-space pointer sample into display space.
///
/// This is the single boundary where the image origin is subtracted. Every
/// pointer sample (press, move, release) must pass through here before any
/// rectangle math sees it; mixing page and image-relative coordinates across
/// the three events is how selections drift.
#[must_use]
pub fn pointer_to_display(page_x: f64, page_y: f64, metrics: &DisplayMetrics) -> DisplayPoint {
    DisplayPoint {
        x: page_x - metrics.image_left,
        y: page_y - metrics.image_top,
    }
}

/// Map a display-space rectangle into the natural-image crop region.
///
/// Returns `None` while no image is laid out (zero rendered size).
#[must_use]
pub fn to_crop_region(rect: DisplayRect, metrics: &DisplayMetrics) -> Option<CropRegion> {
    if !metrics.is_ready() {
        return None;
    }

    let width_ratio = metrics.width_ratio();
    let height_ratio = metrics.height_ratio();

    Some(CropRegion {
        x: rect.left * width_ratio,
        y: rect.top * height_ratio,
        width: rect.width * width_ratio,
        height: rect.height * height_ratio,
    })
}
