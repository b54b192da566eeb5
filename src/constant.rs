// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Engine constants that should not be changed by the user.

/// Minimum drag extent in display pixels before a release commits a
/// selection (strictly greater-than; a plain click never commits).
pub const MIN_DRAG_SIZE: f64 = 10.0;

/// Stroke width of the selection overlay outline.
pub const SELECTION_STROKE_WIDTH: f32 = 5.0;

/// Dash pattern of the selection overlay outline (on, off).
pub const SELECTION_DASH: [f32; 2] = [10.0, 10.0];

/// Shadow blur radius of the selection overlay outline.
pub const SELECTION_SHADOW_BLUR: f32 = 5.0;

/// Stroke color of the selection overlay outline (RGBA).
pub const SELECTION_STROKE_COLOR: [u8; 4] = [255, 255, 255, 255];

/// File name of the bundled export artifact.
pub const BUNDLE_FILE_NAME: &str = "cropped-images.zip";

/// Folder all bundle entries are placed under.
pub const BUNDLE_FOLDER: &str = "cropped-images";

/// Base name shared by every exported crop, single or bundled.
pub const EXPORT_STEM: &str = "cropped-image";

/// Extension of bundle entries. Historically `.jpg` even though the payload
/// is PNG-encoded; consumers of the artifact rely on these exact names.
pub const BUNDLE_ENTRY_EXT: &str = "jpg";

/// MIME type of every exported raster payload.
pub const EXPORT_MIME: &str = "image/png";

/// MIME type of the bundled export artifact.
pub const BUNDLE_MIME: &str = "application/zip";
