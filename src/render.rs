// SPDX-License-Identifier: GPL-3.0-or-later
// src/render.rs
//
// Crop renderer: samples the natural-space region of a selection out of the
// source image and resamples it to the selection's display size.

use std::fmt;
use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader, RgbaImage};

use crate::domain::geometry::{self, DisplayMetrics, DisplayRect};

/// The decoded source image all crops sample from.
pub struct SourceImage {
    image: DynamicImage,
}

impl fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.dimensions();
        write!(f, "SourceImage({w}x{h})")
    }
}

impl SourceImage {
    /// Decode an image resource from raw bytes, guessing the format.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let image = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .decode()?;
        Ok(Self { image })
    }

    /// Wrap an already-decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Natural pixel dimensions (width, height).
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// The rendered pixels of exactly one crop.
///
/// Sized like the display-space rectangle, resampled from the natural-space
/// region. Independent per selection and never mutated after creation, so
/// export paths may consume it freely.
#[derive(Debug, Clone)]
pub struct RenderedCrop {
    image: RgbaImage,
}

impl RenderedCrop {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Render one committed selection against the current metrics.
///
/// One sample-and-resample: the source rectangle is the pixel-clamped crop
/// region, the destination the display-space size of `rect`. Returns `None`
/// while no image is laid out, or when the region misses the image entirely;
/// both are valid, recoverable states, not faults.
#[must_use]
pub fn render_crop(
    source: &SourceImage,
    rect: DisplayRect,
    metrics: &DisplayMetrics,
    filter: FilterType,
) -> Option<RenderedCrop> {
    if !rect.is_valid() {
        return None;
    }

    let region = geometry::to_crop_region(rect, metrics)?;
    let (natural_width, natural_height) = source.dimensions();
    let pixel = region.to_pixel_rect(natural_width, natural_height)?;

    // Destination keeps the on-screen size so previews read at scale.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let dest_width = (rect.width.round() as u32).max(1);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let dest_height = (rect.height.round() as u32).max(1);

    let sampled = source
        .image
        .crop_imm(pixel.x, pixel.y, pixel.width, pixel.height)
        .resize_exact(dest_width, dest_height, filter);

    Some(RenderedCrop {
        image: sampled.to_rgba8(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// 200x200 source, left half red, right half blue.
    fn two_tone_source() -> SourceImage {
        let image = RgbaImage::from_fn(200, 200, |x, _| {
            if x < 100 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        SourceImage::from_image(DynamicImage::ImageRgba8(image))
    }

    fn metrics(rendered: (f64, f64), natural: (f64, f64)) -> DisplayMetrics {
        DisplayMetrics {
            image_left: 0.0,
            image_top: 0.0,
            rendered_width: rendered.0,
            rendered_height: rendered.1,
            natural_width: natural.0,
            natural_height: natural.1,
        }
    }

    #[test]
    fn crop_has_display_space_dimensions() {
        let source = two_tone_source();
        // Rendered at quarter size: ratio 4 on both axes.
        let m = metrics((50.0, 50.0), (200.0, 200.0));
        let rect = DisplayRect::new(10.0, 10.0, 25.0, 20.0);

        let crop = render_crop(&source, rect, &m, FilterType::Triangle).unwrap();
        assert_eq!((crop.width(), crop.height()), (25, 20));
    }

    #[test]
    fn crop_samples_from_natural_space() {
        let source = two_tone_source();
        // Rendered at half size: display x 0..50 covers the red half.
        let m = metrics((100.0, 100.0), (200.0, 200.0));

        let red = render_crop(
            &source,
            DisplayRect::new(0.0, 0.0, 50.0, 50.0),
            &m,
            FilterType::Nearest,
        )
        .unwrap();
        assert_eq!(red.image().get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(red.image().get_pixel(49, 49), &Rgba([255, 0, 0, 255]));

        let blue = render_crop(
            &source,
            DisplayRect::new(50.0, 0.0, 50.0, 50.0),
            &m,
            FilterType::Nearest,
        )
        .unwrap();
        assert_eq!(blue.image().get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
        assert_eq!(blue.image().get_pixel(49, 49), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn render_requires_ready_metrics() {
        let source = two_tone_source();
        let rect = DisplayRect::new(0.0, 0.0, 50.0, 50.0);
        assert!(render_crop(&source, rect, &DisplayMetrics::default(), FilterType::Triangle).is_none());
    }

    #[test]
    fn render_rejects_rect_off_the_image() {
        let source = two_tone_source();
        let m = metrics((100.0, 100.0), (200.0, 200.0));
        let rect = DisplayRect::new(150.0, 0.0, 40.0, 40.0);
        assert!(render_crop(&source, rect, &m, FilterType::Triangle).is_none());
    }

    #[test]
    fn source_decodes_from_png_bytes() {
        let image = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let source = SourceImage::from_bytes(&bytes).unwrap();
        assert_eq!(source.dimensions(), (3, 2));
    }
}
