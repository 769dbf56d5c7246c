// image-optimizer/src/cli.rs
use crate::core::{ResizeAlgorithm, RunConfig, SaveLocation};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "image-optimizer", version, about = "Resize and re-encode every image in a folder")]
pub struct Cli {
    /// Directory to scan (defaults to ./images)
    pub directory: Option<PathBuf>,

    /// Maximum output width in pixels
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Maximum output height in pixels
    #[arg(long)]
    pub max_height: Option<u32>,

    /// Where to write optimized files
    #[arg(long, value_enum)]
    pub save_location: Option<Location>,

    /// Suffix added to output names that do not replace the original
    #[arg(long)]
    pub suffix: Option<String>,

    /// Replace the original file with the optimized one
    #[arg(long)]
    pub overwrite: bool,

    /// Keep output basenames exactly as they are
    #[arg(long)]
    pub no_normalize: bool,

    /// Primary format quality (1-100)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Do not write an extra WebP copy
    #[arg(long)]
    pub no_webp: bool,

    /// WebP copy quality (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub webp_quality: Option<u8>,

    /// Directory name to skip when recursing (repeatable)
    #[arg(short, long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// File extension to optimize, e.g. .jpg (repeatable, replaces the defaults)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Worker threads (0 = one per core)
    #[arg(short = 'j', long, default_value_t = 0)]
    pub threads: usize,

    /// Resampling filter used when shrinking
    #[arg(long, value_enum, default_value_t = Algorithm::Lanczos3)]
    pub algorithm: Algorithm,

    /// Show a progress bar
    #[arg(short, long)]
    pub progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Same,
    Resized,
}

impl From<Location> for SaveLocation {
    fn from(location: Location) -> Self {
        match location {
            Location::Same => SaveLocation::Same,
            Location::Resized => SaveLocation::Resized,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}

impl Cli {
    /// Lays the given flags over the default configuration.
    pub fn into_config(self) -> RunConfig {
        let mut config = RunConfig::default();

        if let Some(directory) = self.directory {
            config.directory = directory;
        }
        if let Some(width) = self.max_width {
            config.max_width = width;
        }
        if let Some(height) = self.max_height {
            config.max_height = height;
        }
        if let Some(location) = self.save_location {
            config.save_location = location.into();
        }
        if let Some(suffix) = self.suffix {
            config.suffix = suffix;
        }
        if let Some(quality) = self.quality {
            config.quality = quality;
        }
        if let Some(quality) = self.webp_quality {
            config.webp_quality = quality;
        }
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.iter().map(|ext| dotted(ext)).collect();
        }

        config.overwrite_original = self.overwrite;
        config.normalize_basename = !self.no_normalize;
        config.convert_to_webp = !self.no_webp;
        config.exclude_dirs.extend(self.exclude);
        config.recursive = self.recursive;
        config.threads = self.threads;
        config.algorithm = self.algorithm.into();
        config.progress = self.progress;

        config
    }
}

fn dotted(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}
