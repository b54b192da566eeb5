// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Engine messages: every event the collaborators feed into the engine.

use crate::render::SourceImage;

/// Events driving the engine.
///
/// Pointer samples arrive in raw page coordinates; the engine normalizes
/// them into display space at its boundary, once, before any rectangle math.
#[derive(Debug)]
pub enum EngineMessage {
    // Image lifecycle.
    /// A new image resource finished decoding and replaces the current one.
    ImageLoaded(SourceImage),

    // Layout.
    /// The viewport changed; the rendered image box must be re-read.
    ViewportResized,

    // Pointer gestures.
    PointerPressed { page_x: f64, page_y: f64 },
    PointerMoved { page_x: f64, page_y: f64 },
    PointerReleased { page_x: f64, page_y: f64 },

    // Selection list.
    /// Remove the committed selection at this index; out of range is a no-op.
    RemoveSelection(usize),
}
