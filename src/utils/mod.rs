// image-optimizer/src/utils/mod.rs
mod format;
mod names;
mod paths;

pub use format::{format_duration, format_elapsed, format_file_size};
pub use names::normalize_basename;
pub use paths::{
    output_file_name, plan_output_paths, resolve_output_paths, retry_io, write_atomic,
    OutputPaths,
};

pub fn calculate_aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        0.0
    } else {
        width as f32 / height as f32
    }
}
