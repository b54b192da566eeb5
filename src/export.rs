// SPDX-License-Identifier: GPL-3.0-or-later
// src/export.rs
//
// Export packager: serializes rendered crops into downloadable artifacts,
// one file at a time or bundled into a single archive.

use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, bail};
use futures_util::future::try_join_all;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::constant::{
    BUNDLE_ENTRY_EXT, BUNDLE_FILE_NAME, BUNDLE_FOLDER, BUNDLE_MIME, EXPORT_MIME, EXPORT_STEM,
};
use crate::render::RenderedCrop;

/// One downloadable artifact handed to the delivery collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// The "download" side of the presentation layer.
///
/// Delivery is a side effect the engine cannot observe; a sink that fails
/// surfaces the failure to the caller, never a partial artifact.
pub trait DeliverySink {
    fn deliver(&mut self, artifact: ExportArtifact) -> anyhow::Result<()>;
}

/// Serializes rendered crops and triggers their delivery.
#[derive(Debug, Default)]
pub struct ExportPackager {
    bundle_in_flight: AtomicBool,
}

impl ExportPackager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode one crop to PNG and deliver it as `cropped-image-<number>`.
    ///
    /// `number` is the 1-based position of the selection; the single-file
    /// artifact carries no extension.
    pub async fn export_one(
        &self,
        crop: RenderedCrop,
        number: usize,
        sink: &mut dyn DeliverySink,
    ) -> anyhow::Result<()> {
        let bytes = tokio::task::spawn_blocking(move || encode_png(&crop))
            .await
            .context("export encode task failed")??;

        sink.deliver(ExportArtifact {
            file_name: format!("{EXPORT_STEM}-{number}"),
            mime: EXPORT_MIME,
            bytes,
        })
    }

    /// Encode every crop and deliver one bundled `cropped-images.zip`.
    ///
    /// Encodes run concurrently but their results are collected in commit
    /// order, so entry order in the archive is deterministic. A failure on
    /// any item aborts the bundle before the archive is finalized; a partial
    /// archive is never delivered. At most one bundle may be in flight; a
    /// second call while one is pending is rejected rather than interleaved.
    pub async fn export_all(
        &self,
        crops: Vec<RenderedCrop>,
        sink: &mut dyn DeliverySink,
    ) -> anyhow::Result<()> {
        if self
            .bundle_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("rejecting bundle export: another bundle is in flight");
            bail!("a bundle export is already in flight");
        }
        let _guard = BundleGuard(&self.bundle_in_flight);

        let encodes = crops
            .into_iter()
            .map(|crop| tokio::task::spawn_blocking(move || encode_png(&crop)));
        let payloads: Vec<Vec<u8>> = try_join_all(encodes)
            .await
            .context("bundle encode task failed")?
            .into_iter()
            .collect::<anyhow::Result<_>>()?;

        let bytes = build_bundle(&payloads)?;

        sink.deliver(ExportArtifact {
            file_name: BUNDLE_FILE_NAME.to_string(),
            mime: BUNDLE_MIME,
            bytes,
        })
    }

    /// Whether a bundle export is currently pending.
    #[must_use]
    pub fn bundle_in_flight(&self) -> bool {
        self.bundle_in_flight.load(Ordering::Acquire)
    }
}

/// Clears the in-flight flag on every exit path, error or not.
struct BundleGuard<'a>(&'a AtomicBool);

impl Drop for BundleGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Serialize one crop to PNG bytes.
fn encode_png(crop: &RenderedCrop) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        crop.image().as_raw(),
        crop.width(),
        crop.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Write the encoded payloads into one deflated archive under the shared
/// folder, in the order given.
fn build_bundle(payloads: &[Vec<u8>]) -> anyhow::Result<Vec<u8>> {
    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (index, payload) in payloads.iter().enumerate() {
        // 1-based entry names. The .jpg extension over PNG bytes is part of
        // the artifact contract; see DESIGN.md.
        let name = format!(
            "{BUNDLE_FOLDER}/{EXPORT_STEM}-{}.{BUNDLE_ENTRY_EXT}",
            index + 1
        );
        archive.start_file(name, options)?;
        archive.write_all(payload)?;
    }

    Ok(archive.finish()?.into_inner())
}
