// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/overlay.rs
//
// Per-frame overlay output: the geometry the rendering collaborator draws,
// plus the fixed selection style.

use crate::constant::{
    SELECTION_DASH, SELECTION_SHADOW_BLUR, SELECTION_STROKE_COLOR, SELECTION_STROKE_WIDTH,
};
use crate::domain::geometry::DisplayRect;

/// Fixed visual style of every selection outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub stroke_color: [u8; 4],
    pub stroke_width: f32,
    pub dash: [f32; 2],
    pub shadow_blur: f32,
}

/// The one style selections are drawn with.
pub const SELECTION_STYLE: OverlayStyle = OverlayStyle {
    stroke_color: SELECTION_STROKE_COLOR,
    stroke_width: SELECTION_STROKE_WIDTH,
    dash: SELECTION_DASH,
    shadow_blur: SELECTION_SHADOW_BLUR,
};

/// One rectangle for the renderer, geometry passed through unmodified.
///
/// While a drag runs left or above its anchor, the candidate's width/height
/// are negative here too; the drawing surface is expected to handle that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<DisplayRect> for OverlayRect {
    fn from(rect: DisplayRect) -> Self {
        Self {
            x: rect.left,
            y: rect.top,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// Everything the rendering collaborator needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    /// Committed rectangles, in commit order.
    pub committed: Vec<OverlayRect>,
    /// The in-progress candidate, present only while dragging.
    pub candidate: Option<OverlayRect>,
    pub style: OverlayStyle,
}
