// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// Crate root for the Shrike selection-and-crop engine.

//! Shrike lets a host application track rectangular selections drawn over a
//! rendered image and export each one as a pixel-exact crop of the original,
//! singly or bundled into one archive.
//!
//! The crate is the coordinate engine only. Presentation — file picking,
//! drawing, the actual download — stays with the host, which plugs in
//! through [`app::LayoutProbe`] (where does the image render right now?) and
//! [`export::DeliverySink`] (hand the user this artifact). Events flow in as
//! [`app::EngineMessage`]s; overlay geometry flows back out per frame.

pub mod app;
pub mod config;
pub mod constant;
pub mod domain;
pub mod export;
pub mod render;

pub use app::{Engine, EngineMessage, LayoutProbe, OverlayFrame, RenderedBox};
pub use config::EngineConfig;
pub use domain::{CropRegion, DisplayMetrics, DisplayPoint, DisplayRect, SelectionSet};
pub use export::{DeliverySink, ExportArtifact, ExportPackager};
pub use render::{RenderedCrop, SourceImage};
