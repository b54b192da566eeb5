// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Tunable configuration for the engine.

use image::imageops::FilterType;

use crate::constant::MIN_DRAG_SIZE;

/// Tunable configuration for the engine.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Minimum drag extent (display pixels) for a release to commit.
    pub min_drag_size: f64,
    /// Resampling filter used when scaling a crop to its display size.
    pub resample_filter: FilterType,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_drag_size: MIN_DRAG_SIZE,
            resample_filter: FilterType::Triangle,
        }
    }
}
