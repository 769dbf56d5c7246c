// image-optimizer/src/processors/loader.rs
use crate::core::{OptimizerError, Result};
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::path::Path;

#[derive(Clone)]
pub struct Loader {
    max_dimensions: (u32, u32),
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: (100_000, 100_000),
        }
    }

    /// Reads only the header to get width and height.
    pub fn dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        let dimensions = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()?;

        self.check_dimensions(dimensions)?;
        Ok(dimensions)
    }

    /// Decodes straight from the file, so the encoded bytes are never held
    /// alongside the pixels.
    pub fn load(&self, path: &Path) -> Result<DynamicImage> {
        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| {
                OptimizerError::ProcessingError(format!("Failed to decode image: {}", e))
            })?;

        let (width, height) = image.dimensions();
        self.check_dimensions((width, height))?;

        log::debug!(
            "Decoded image: {}x{} pixels, color: {:?}",
            width,
            height,
            image.color()
        );

        Ok(image)
    }

    /// Format from the extension, falling back to the file's magic bytes.
    pub fn detect_format(&self, path: &Path) -> Result<ImageFormat> {
        if let Ok(format) = ImageFormat::from_path(path) {
            return Ok(format);
        }

        ImageReader::open(path)?
            .with_guessed_format()?
            .format()
            .ok_or_else(|| {
                OptimizerError::UnsupportedFormat(format!(
                    "Cannot tell image format of {}",
                    path.display()
                ))
            })
    }

    fn check_dimensions(&self, (width, height): (u32, u32)) -> Result<()> {
        let (max_w, max_h) = self.max_dimensions;
        if width > max_w || height > max_h {
            return Err(OptimizerError::ProcessingError(format!(
                "Image dimensions {}x{} exceed maximum {}x{}",
                width, height, max_w, max_h
            )));
        }
        Ok(())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
