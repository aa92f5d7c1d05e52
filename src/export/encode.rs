//! PNG encoding of the share image and decoding of the overlay asset.

use std::future::Future;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder as PngWriter};
use image::{ExtendedColorType, ImageEncoder as _, ImageFormat};
use tracing::warn;

use crate::error::ExportError;

use super::raster::RasterImage;
use super::render::RenderOptions;

/// MIME type of everything this module produces.
pub const PNG_MIME_TYPE: &str = "image/png";

/// An encoded image ready to share or save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// The encoded bytes.
    pub bytes: Vec<u8>,
    /// The MIME type of `bytes`.
    pub mime_type: &'static str,
}

/// Turns a raster into a transferable blob.
pub trait ImageEncoder {
    /// Encodes `image` at the quality in `options`.
    fn encode(
        &self,
        image: &RasterImage,
        options: &RenderOptions,
    ) -> impl Future<Output = Result<EncodedImage, ExportError>> + Send;
}

/// Encodes rasters as 8-bit RGBA PNG.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PngEncoder;

impl PngEncoder {
    /// Creates an encoder.
    pub fn new() -> Self {
        Self
    }

    /// Compression for a quality between 0 and 1.
    ///
    /// PNG is lossless, so quality only trades file size for encoding
    /// speed: lower quality compresses faster and less.
    pub fn compression(quality: f32) -> CompressionType {
        let quality = quality.clamp(0.0, 1.0);
        if quality >= 0.9 {
            CompressionType::Best
        } else if quality >= 0.5 {
            CompressionType::Default
        } else {
            CompressionType::Fast
        }
    }

    /// Encodes synchronously at `quality`.
    pub fn encode_sync(
        &self,
        image: &RasterImage,
        quality: f32,
    ) -> Result<EncodedImage, ExportError> {
        if image.is_empty() {
            return Err(ExportError::Encode {
                message: "image has no pixels".to_string(),
            });
        }

        let mut bytes = Vec::new();
        PngWriter::new_with_quality(&mut bytes, Self::compression(quality), FilterType::Adaptive)
            .write_image(
                image.as_bytes(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|err| ExportError::Encode {
                message: err.to_string(),
            })?;

        Ok(EncodedImage {
            bytes,
            mime_type: PNG_MIME_TYPE,
        })
    }
}

impl ImageEncoder for PngEncoder {
    async fn encode(
        &self,
        image: &RasterImage,
        options: &RenderOptions,
    ) -> Result<EncodedImage, ExportError> {
        self.encode_sync(image, options.quality)
    }
}

/// Decodes a PNG into an RGBA raster.
pub fn decode_png(bytes: &[u8]) -> Result<RasterImage, String> {
    let decoded =
        image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(|e| e.to_string())?;
    Ok(RasterImage::from_buffer(decoded.into_rgba8()))
}

/// Loads the overlay asset, or `None` if it is missing or unreadable.
///
/// An unavailable overlay never blocks an export; the share image is simply
/// produced without it.
pub fn load_overlay(path: &Path) -> Option<RasterImage> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Overlay image unavailable, skipping");
            return None;
        }
    };

    match decode_png(&bytes) {
        Ok(image) => Some(image),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Overlay image invalid, skipping");
            None
        }
    }
}
