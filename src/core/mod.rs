// image-optimizer/src/core/mod.rs
pub mod processor;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub use processor::ImageProcessor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

/// Where optimized output is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveLocation {
    /// Next to the source file (or over it, when overwriting).
    Same,
    /// Inside a `resized` folder beside the source file.
    Resized,
}

/// Name of the sibling folder used by [`SaveLocation::Resized`].
pub const RESIZED_DIR: &str = "resized";

/// Extension of the secondary (WebP) copy.
pub const WEBP_EXT: &str = "webp";

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub directory: PathBuf,
    pub max_width: u32,
    pub max_height: u32,
    pub save_location: SaveLocation,
    pub suffix: String,
    pub overwrite_original: bool,
    pub normalize_basename: bool,
    pub quality: u8,
    pub convert_to_webp: bool,
    pub webp_quality: u8,
    pub exclude_dirs: BTreeSet<String>,
    pub recursive: bool,
    /// Dot-prefixed, compared case-insensitively.
    pub extensions: BTreeSet<String>,
    /// Worker count; zero uses the global rayon pool.
    pub threads: usize,
    pub algorithm: ResizeAlgorithm,
    pub progress: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("images"),
            max_width: 1920,
            max_height: 1920,
            save_location: SaveLocation::Resized,
            suffix: "_resized".to_string(),
            overwrite_original: false,
            normalize_basename: true,
            quality: 85,
            convert_to_webp: true,
            webp_quality: 85,
            exclude_dirs: BTreeSet::new(),
            recursive: false,
            extensions: [".jpg", ".jpeg"].iter().map(|s| s.to_string()).collect(),
            threads: 0,
            algorithm: ResizeAlgorithm::Lanczos3,
            progress: false,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(OptimizerError::InvalidParameter(
                "Maximum width and height must be greater than zero".to_string(),
            ));
        }

        for (name, quality) in [("quality", self.quality), ("WebP quality", self.webp_quality)] {
            if !(1..=100).contains(&quality) {
                return Err(OptimizerError::InvalidParameter(format!(
                    "{} must be between 1 and 100, got {}",
                    name, quality
                )));
            }
        }

        if self.suffix.contains(&['/', '\\'][..]) {
            return Err(OptimizerError::InvalidParameter(format!(
                "Suffix may not contain path separators: {}",
                self.suffix
            )));
        }

        if let Some(ext) = self.extensions.iter().find(|ext| !ext.starts_with('.') || ext.len() < 2) {
            return Err(OptimizerError::InvalidParameter(format!(
                "Extensions must look like \".jpg\", got \"{}\"",
                ext
            )));
        }

        Ok(())
    }

    /// Whether `path` carries one of the configured extensions, ignoring case.
    pub fn wants_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };

        self.extensions
            .iter()
            .any(|wanted| wanted.strip_prefix('.').unwrap_or(wanted).eq_ignore_ascii_case(ext))
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.contains(name)
    }
}

/// Upper bounds handed to the resizer. `None` leaves that axis unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetSize {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl TargetSize {
    /// Bounds only the axes that exceed their configured maximum.
    pub fn for_image(width: u32, height: u32, max_width: u32, max_height: u32) -> Self {
        Self {
            width: (width > max_width).then_some(max_width),
            height: (height > max_height).then_some(max_height),
        }
    }

    pub fn is_constrained(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}

/// Outcome of one successfully transformed file.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub webp: Option<PathBuf>,
    pub original_size: u64,
    pub new_size: u64,
    pub dimensions: (u32, u32),
    pub new_dimensions: (u32, u32),
    pub resized: bool,
    pub replaced_original: bool,
}

impl ProcessedImage {
    /// Original minus new size; negative when the output grew.
    pub fn saved(&self) -> i64 {
        self.original_size as i64 - self.new_size as i64
    }
}

/// Running totals shared by the batch workers.
#[derive(Debug, Default)]
pub struct RunStats {
    processed: AtomicU64,
    saved: AtomicI64,
    failed: AtomicU64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, image: &ProcessedImage) {
        self.saved.fetch_add(image.saved(), Ordering::Relaxed);
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    pub fn saved(&self) -> i64 {
        self.saved.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: u64,
    pub saved: i64,
    pub failed: u64,
    pub walk_errors: u64,
    pub elapsed: Duration,
    pub cancelled: bool,
}

/// Stops a run between files.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only for the call that actually flipped the flag.
    pub fn cancel(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::Relaxed)
            .is_ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Processing error: {0}")]
    ProcessingError(String),

    #[error("Directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Run cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, OptimizerError>;
