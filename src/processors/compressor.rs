// image-optimizer/src/processors/compressor.rs
use crate::core::{OptimizerError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat};
use oxipng::{optimize_from_memory, Options};
use std::io::Cursor;

/// Encodes decoded images into file bytes at a fixed quality.
pub struct Compressor {
    quality: u8,
    optimize_png: bool,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            optimize_png: true,
        }
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn compress_to_bytes(&self, image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
        log::debug!(
            "Encoding {}x{} image as {:?}, quality: {}",
            image.width(),
            image.height(),
            format,
            self.quality
        );

        match format {
            ImageFormat::Jpeg => self.encode_jpeg(image),
            ImageFormat::Png => self.encode_png(image),
            ImageFormat::WebP => self.encode_webp(image),
            _ => self.encode_generic(image, format),
        }
    }

    fn encode_jpeg(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            let mut encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);

            // JPEG has no alpha channel.
            match image {
                DynamicImage::ImageLuma8(gray) => encoder.encode_image(gray)?,
                DynamicImage::ImageRgb8(rgb) => encoder.encode_image(rgb)?,
                other => encoder.encode_image(&other.to_rgb8())?,
            }
        }

        Ok(buffer)
    }

    fn encode_png(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let raw = self.encode_generic(image, ImageFormat::Png)?;
        if !self.optimize_png {
            return Ok(raw);
        }

        optimize_from_memory(&raw, &Options::default())
            .map_err(|e| OptimizerError::ProcessingError(format!("PNG optimization failed: {}", e)))
    }

    fn encode_webp(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let (width, height) = image.dimensions();
        let quality = f32::from(self.quality);

        let encoded = match image {
            DynamicImage::ImageRgb8(rgb) => {
                webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_simple(false, quality)
            }
            DynamicImage::ImageRgba8(rgba) => {
                webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_simple(false, quality)
            }
            other => {
                let rgba = other.to_rgba8();
                webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_simple(false, quality)
            }
        }
        .map_err(|e| OptimizerError::ProcessingError(format!("WebP encoding failed: {:?}", e)))?;

        Ok(encoded.to_vec())
    }

    fn encode_generic(&self, image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, format)?;
        Ok(buffer.into_inner())
    }
}
