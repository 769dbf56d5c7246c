// image-optimizer/src/processors/report.rs
use crate::core::{OptimizerError, ProcessedImage, RunSummary};
use crate::utils::{format_elapsed, format_file_size};
use indicatif::{ProgressBar, ProgressStyle};
use log::Level;
use std::path::Path;

/// Console output for a run.
///
/// Every message is built in full before it is handed to the logger, so lines
/// from different workers never interleave. With a progress bar active, the
/// bar is hidden while a line is written.
pub struct Reporter {
    progress: Option<ProgressBar>,
}

impl Reporter {
    pub fn new() -> Self {
        Self { progress: None }
    }

    pub fn with_progress(total: usize) -> Self {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { progress: Some(pb) }
    }

    pub fn processed(&self, image: &ProcessedImage) {
        let mut line = processed_line(image);
        if image.replaced_original {
            line.push_str(&format!("\nReplaced original image: {}", image.source.display()));
        }
        self.emit(Level::Info, line);
        self.tick();
    }

    pub fn failed(&self, path: &Path, err: &OptimizerError) {
        self.emit(Level::Error, format!("Error processing {}: {}", path.display(), err));
        self.tick();
    }

    pub fn summary(&self, summary: &RunSummary) {
        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }

        if summary.cancelled {
            log::warn!("Image optimization cancelled.");
        } else {
            log::info!("Image optimization completed.");
        }
        for line in summary_lines(summary) {
            log::info!("{}", line);
        }
    }

    fn tick(&self) {
        if let Some(pb) = &self.progress {
            pb.inc(1);
        }
    }

    fn emit(&self, level: Level, line: String) {
        match &self.progress {
            Some(pb) => pb.suspend(|| log::log!(level, "{}", line)),
            None => log::log!(level, "{}", line),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn processed_line(image: &ProcessedImage) -> String {
    let mut line = format!(
        "Processed: {} ({}) -> {} ({})",
        image.source.display(),
        format_file_size(image.original_size as i64),
        image.destination.display(),
        format_file_size(image.new_size as i64),
    );

    if image.resized {
        line.push_str(" (resized)");
    }

    let saved = image.saved();
    if saved > 0 {
        line.push_str(&format!(" (Saved {})", format_file_size(saved)));
    }

    line
}

pub fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![
        format!("Total images processed: {}", summary.processed),
        format!("Total space saved: {}", format_file_size(summary.saved)),
    ];

    if summary.failed > 0 || summary.walk_errors > 0 {
        lines.push(format!(
            "Failed: {} file(s), {} unreadable entr{}",
            summary.failed,
            summary.walk_errors,
            if summary.walk_errors == 1 { "y" } else { "ies" }
        ));
    }

    lines.push(format!("Execution Time: {}", format_elapsed(summary.elapsed)));
    lines
}
