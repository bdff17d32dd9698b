// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Downsampler — loads an image, shrinks it by a fixed ratio while keeping the
// aspect ratio, and flattens the raster into RGB triples. Operates on
// in-memory images using the `image` crate.

use std::path::Path;

use chromadump_core::error::{ChromaError, Result};
use chromadump_core::{PixelBuffer, Rgb};
use image::{DynamicImage, ImageReader};
use tracing::{debug, info, instrument};

/// Downsampling pipeline operating on a single in-memory image.
///
/// `shrink` consumes `self` and returns a new `Downsampler`, so loading,
/// resizing, and flattening chain naturally:
///
/// ```ignore
/// let pixels = Downsampler::open("imgs/test/1.jpg")?
///     .shrink(0.03)
///     .flatten()?;
/// ```
pub struct Downsampler {
    image: DynamicImage,
}

impl Downsampler {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    ///
    /// A missing file surfaces as `ChromaError::Io` with `NotFound`, before any
    /// decoding is attempted.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|err| {
                ChromaError::Image(format!("failed to decode {}: {}", path.display(), err))
            })?;
        info!(width = image.width(), height = image.height(), "Image loaded");
        Ok(Self { image })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    // -- Transformations ------------------------------------------------------

    /// Shrink the image by `rate`, preserving aspect ratio.
    ///
    /// The target box is `floor(width * rate)` x `floor(height * rate)`, each
    /// side at least 1 pixel. The image is fitted inside the box and is never
    /// enlarged.
    #[instrument(skip(self), fields(rate))]
    pub fn shrink(self, rate: f64) -> Self {
        let (box_w, box_h) = target_box(self.image.width(), self.image.height(), rate);
        let resized = self.image.thumbnail(box_w, box_h);
        debug!(
            box_w,
            box_h,
            new_w = resized.width(),
            new_h = resized.height(),
            "Shrink complete"
        );
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Flatten the raster into row-major RGB triples.
    ///
    /// Alpha is discarded and luma is expanded to three equal channels.
    pub fn flatten(&self) -> Result<PixelBuffer> {
        let rgb = self.image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels: Vec<Rgb> = rgb.pixels().map(|p| Rgb(p.0)).collect();
        let buffer = PixelBuffer::from_raster(pixels, width, height)?;
        info!(pixels = buffer.len(), channels = 3, "Flattened pixel data");
        Ok(buffer)
    }
}

/// Compute the thumbnail bounding box for a downsampling ratio.
fn target_box(width: u32, height: u32, rate: f64) -> (u32, u32) {
    let scale = |side: u32| ((side as f64 * rate) as u32).clamp(1, side.max(1));
    (scale(width), scale(height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb as ImageRgb, RgbImage, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            ImageRgb([(x % 256) as u8, (y % 256) as u8, 128])
        }))
    }

    #[test]
    fn shrink_keeps_aspect_ratio() {
        let sampler = Downsampler::from_dynamic(gradient(200, 100)).shrink(0.2);
        assert_eq!((sampler.width(), sampler.height()), (40, 20));
    }

    #[test]
    fn pixel_count_matches_resized_dimensions() {
        let sampler = Downsampler::from_dynamic(gradient(300, 200)).shrink(0.03);
        let buffer = sampler.flatten().expect("flatten failed");
        let (w, h) = buffer.dimensions().expect("raster dimensions");
        assert_eq!((w, h), (sampler.width(), sampler.height()));
        assert_eq!(buffer.len(), (w * h) as usize);
        assert_eq!((w, h), (9, 6));
    }

    #[test]
    fn tiny_images_never_collapse_to_zero() {
        let sampler = Downsampler::from_dynamic(gradient(10, 5)).shrink(0.03);
        assert_eq!((sampler.width(), sampler.height()), (1, 1));
        assert_eq!(sampler.flatten().unwrap().len(), 1);
    }

    #[test]
    fn flatten_drops_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            2,
            2,
            image::Rgba([10, 20, 30, 40]),
        ));
        let buffer = Downsampler::from_dynamic(img).flatten().unwrap();
        assert!(buffer.iter().all(|p| *p == Rgb::new(10, 20, 30)));
    }

    #[test]
    fn flatten_is_row_major() {
        let buffer = Downsampler::from_dynamic(gradient(3, 2)).flatten().unwrap();
        assert_eq!(buffer.pixels()[1], Rgb::new(1, 0, 128));
        assert_eq!(buffer.pixels()[3], Rgb::new(0, 1, 128));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Downsampler::open(dir.path().join("9.jpg"))
            .err()
            .expect("opening a missing file must fail");
        assert!(err.is_not_found(), "unexpected error: {err}");
    }

    #[test]
    fn opens_encoded_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.jpg");
        gradient(64, 32).save(&path).unwrap();

        let sampler = Downsampler::open(&path).unwrap();
        assert_eq!((sampler.width(), sampler.height()), (64, 32));
    }
}
