mod cli;
mod core;
mod processors;
mod utils;

pub use crate::cli::{Algorithm, Cli, Location};
pub use crate::core::{
    CancelToken, ImageProcessor, OptimizerError, ProcessedImage, ResizeAlgorithm, Result,
    RunConfig, RunStats, RunSummary, SaveLocation, TargetSize, RESIZED_DIR, WEBP_EXT,
};
pub use crate::processors::report::{processed_line, summary_lines};
pub use crate::processors::{
    fit_inside, group_by_output, validate_root, BatchProcessor, Compressor, FileFacts, Loader,
    Reporter, Resizer, WalkReport, Walker,
};
pub use crate::utils::{
    calculate_aspect_ratio, format_duration, format_elapsed, format_file_size,
    normalize_basename, output_file_name, plan_output_paths, resolve_output_paths, OutputPaths,
};
