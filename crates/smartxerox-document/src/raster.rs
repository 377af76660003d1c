// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster settings for imagery embedded in invoices.
//
// Images are rasterised at `scale` times screen density (96 px per inch) and
// passed through a JPEG encode at the configured quality before embedding, so
// every invoice carries imagery of the same fidelity regardless of the source.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use printpdf::{RawImage, RawImageData, RawImageFormat};
use smartxerox_core::error::ShopError;
use tracing::debug;

/// Screen pixels per inch that `scale` multiplies.
const SCREEN_DPI: f32 = 96.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterSettings {
    /// JPEG quality in 0.0..=1.0.
    pub jpeg_quality: f32,
    /// Rasterisation scale relative to screen density.
    pub scale: f32,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            jpeg_quality: 0.98,
            scale: 2.0,
        }
    }
}

impl RasterSettings {
    /// Effective pixels per inch of embedded imagery.
    pub fn dpi(&self) -> f32 {
        SCREEN_DPI * self.scale
    }

    /// Quality as the encoder's 1..=100 integer.
    pub fn encoder_quality(&self) -> u8 {
        (self.jpeg_quality.clamp(0.01, 1.0) * 100.0).round() as u8
    }
}

/// An image ready to embed, with the size it should print at.
pub struct PreparedImage {
    pub raw: RawImage,
    pub dpi: f32,
    pub width_px: u32,
    pub height_px: u32,
}

impl PreparedImage {
    /// Printed height in points at the prepared density.
    pub fn height_pt(&self) -> f32 {
        self.height_px as f32 / self.dpi * 72.0
    }

    pub fn width_pt(&self) -> f32 {
        self.width_px as f32 / self.dpi * 72.0
    }
}

/// Decode `bytes`, fit them to `height_in` inches at the settings' density
/// (never upscaling), and round-trip through JPEG at the settings' quality.
pub fn prepare_image(
    bytes: &[u8],
    height_in: f32,
    settings: &RasterSettings,
) -> Result<PreparedImage, ShopError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ShopError::ImageError(format!("failed to decode image: {e}")))?;

    let target_h = (height_in * settings.dpi()).round().max(1.0) as u32;
    let fitted = if decoded.height() > target_h {
        let target_w = ((decoded.width() as f32) * target_h as f32 / decoded.height() as f32)
            .round()
            .max(1.0) as u32;
        decoded.resize(target_w, target_h, FilterType::Lanczos3)
    } else {
        decoded
    };

    let rgb = fitted.to_rgb8();
    let mut jpeg = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(
        &mut jpeg,
        settings.encoder_quality(),
    ))
    .map_err(|e| ShopError::ImageError(format!("JPEG encode failed: {e}")))?;

    let reloaded: DynamicImage =
        image::load_from_memory_with_format(&jpeg, ImageFormat::Jpeg)
            .map_err(|e| ShopError::ImageError(format!("JPEG decode failed: {e}")))?;
    let rgb = reloaded.to_rgb8();
    let (width_px, height_px) = rgb.dimensions();

    debug!(
        width_px,
        height_px,
        jpeg_bytes = jpeg.len(),
        quality = settings.encoder_quality(),
        "image rasterised for embedding"
    );

    Ok(PreparedImage {
        raw: RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: width_px as usize,
            height: height_px as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        },
        dpi: settings.dpi(),
        width_px,
        height_px,
    })
}

/// Encode a solid-colour PNG, for tests and benches.
#[doc(hidden)]
pub fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([255, 210, 63]));
    let mut out = Cursor::new(Vec::new());
    // Writing a valid in-memory RGB buffer as PNG cannot fail.
    let _ = DynamicImage::ImageRgb8(img).write_to(&mut out, ImageFormat::Png);
    out.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_invoice_quality() {
        let s = RasterSettings::default();
        assert_eq!(s.encoder_quality(), 98);
        assert_eq!(s.dpi(), 192.0);
    }

    #[test]
    fn large_logo_is_scaled_down_to_target_height() {
        let png = sample_png(800, 400);
        let prepared = prepare_image(&png, 0.5, &RasterSettings::default()).expect("prepare");
        assert_eq!(prepared.height_px, 96);
        assert_eq!(prepared.width_px, 192);
        assert!((prepared.height_pt() - 36.0).abs() < 0.01);
    }

    #[test]
    fn small_logo_is_not_upscaled() {
        let png = sample_png(20, 10);
        let prepared = prepare_image(&png, 1.0, &RasterSettings::default()).expect("prepare");
        assert_eq!((prepared.width_px, prepared.height_px), (20, 10));
    }

    #[test]
    fn garbage_is_an_image_error() {
        let result = prepare_image(b"not an image", 1.0, &RasterSettings::default());
        assert!(matches!(result, Err(ShopError::ImageError(_))));
    }
}
