// image-optimizer/src/core/processor.rs
use super::{ProcessedImage, Result, RunConfig, TargetSize};
use crate::processors::metadata::{file_size, FileFacts};
use crate::processors::{Compressor, Loader, Resizer};
use crate::utils::{resolve_output_paths, retry_io, write_atomic};
use image::{GenericImageView, ImageFormat};
use std::path::Path;

/// Resizes and re-encodes one image file at a time.
pub struct ImageProcessor {
    config: RunConfig,
    loader: Loader,
    resizer: Resizer,
    compressor: Compressor,
    webp_compressor: Option<Compressor>,
}

impl ImageProcessor {
    pub fn new(config: RunConfig) -> Result<Self> {
        config.validate()?;

        let resizer = Resizer::new(config.algorithm);
        let compressor = Compressor::new(config.quality);
        let webp_compressor = config
            .convert_to_webp
            .then(|| Compressor::new(config.webp_quality));

        Ok(Self {
            config,
            loader: Loader::new(),
            resizer,
            compressor,
            webp_compressor,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs the whole pipeline for `source`.
    ///
    /// Nothing is counted here; the caller folds the returned record into its
    /// totals. An error always leaves the source in place. Callers must not
    /// run two files with the same planned output at once.
    pub fn process(&self, source: &Path) -> Result<ProcessedImage> {
        let facts = FileFacts::read(source)?;

        let (width, height) = self.loader.dimensions(source)?;
        let target = TargetSize::for_image(width, height, self.config.max_width, self.config.max_height);

        let format = self.loader.detect_format(source)?;
        let paths = resolve_output_paths(source, &self.config)?;

        let image = self.loader.load(source)?;
        let image = self.resizer.fit_within(image, target);
        let new_dimensions = image.dimensions();

        let encoded = self.compressor.compress_to_bytes(&image, format)?;
        write_atomic(&paths.primary, &encoded)?;

        if let (Some(webp_path), Some(webp)) = (&paths.webp, &self.webp_compressor) {
            let encoded = webp.compress_to_bytes(&image, ImageFormat::WebP)?;
            write_atomic(webp_path, &encoded)?;
        }

        let new_size = file_size(&paths.primary)?;
        facts.apply_times(&paths.primary)?;

        let replace = self.config.overwrite_original && paths.primary != source;
        if replace {
            // Swaps over the original in one step.
            retry_io("rename", &paths.primary, || std::fs::rename(&paths.primary, source))?;
        }

        Ok(ProcessedImage {
            source: source.to_path_buf(),
            destination: if replace { source.to_path_buf() } else { paths.primary },
            webp: paths.webp,
            original_size: facts.size,
            new_size,
            dimensions: (width, height),
            new_dimensions,
            resized: target.is_constrained(),
            replaced_original: replace,
        })
    }
}
