// image-optimizer/src/processors/mod.rs
mod batch;
mod compressor;
mod loader;
pub mod metadata;
pub mod report;
mod resizer;
mod walker;

pub use batch::{group_by_output, validate_root, BatchProcessor};
pub use compressor::Compressor;
pub use loader::Loader;
pub use metadata::FileFacts;
pub use report::Reporter;
pub use resizer::{fit_inside, Resizer};
pub use walker::{WalkReport, Walker};
