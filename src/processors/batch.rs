// image-optimizer/src/processors/batch.rs
use crate::core::{
    CancelToken, ImageProcessor, OptimizerError, Result, RunConfig, RunStats, RunSummary,
};
use crate::processors::report::Reporter;
use crate::processors::walker::Walker;
use crate::utils::plan_output_paths;
use rayon::prelude::*;
use std::collections::hash_map::{Entry, HashMap};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Drives one run: find the files, transform them on a worker pool, and
/// report the totals.
pub struct BatchProcessor {
    processor: ImageProcessor,
    thread_pool: Option<rayon::ThreadPool>,
    cancel: CancelToken,
}

impl BatchProcessor {
    pub fn new(config: RunConfig) -> Result<Self> {
        let threads = config.threads;
        let processor = ImageProcessor::new(config)?;

        // Zero threads means the global pool.
        let thread_pool = if threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    OptimizerError::ProcessingError(format!("Failed to create thread pool: {}", e))
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            processor,
            thread_pool,
            cancel: CancelToken::new(),
        })
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &RunConfig {
        self.processor.config()
    }

    /// Processes the configured directory.
    pub fn run(&self) -> Result<RunSummary> {
        let root = self.config().directory.clone();
        self.process_directory(&root)
    }

    pub fn process_directory(&self, root: &Path) -> Result<RunSummary> {
        validate_root(root)?;

        let started = Instant::now();
        let stats = RunStats::new();

        let (files, walk) = Walker::new(self.config()).collect(root)?;
        if files.is_empty() {
            log::warn!("No matching image files found in {}", root.display());
        } else {
            log::debug!("Processing {} images from {}", files.len(), root.display());
        }

        let reporter = if self.config().progress && !files.is_empty() {
            Reporter::with_progress(files.len())
        } else {
            Reporter::new()
        };

        let total = files.len();
        let groups = group_by_output(files, self.config());
        if groups.len() < total {
            log::debug!(
                "{} files share output names, running them in {} groups",
                total,
                groups.len()
            );
        }

        match &self.thread_pool {
            Some(pool) => pool.install(|| self.process_all(&groups, &stats, &reporter)),
            None => self.process_all(&groups, &stats, &reporter),
        }

        let summary = RunSummary {
            processed: stats.processed(),
            saved: stats.saved(),
            failed: stats.failed(),
            walk_errors: walk.errors,
            elapsed: started.elapsed(),
            cancelled: self.cancel.is_cancelled(),
        };
        reporter.summary(&summary);

        Ok(summary)
    }

    fn process_all(&self, groups: &[Vec<PathBuf>], stats: &RunStats, reporter: &Reporter) {
        groups.par_iter().for_each(|group| {
            for path in group {
                // Only checked between files so a started file is always finished.
                if self.cancel.is_cancelled() {
                    return;
                }

                match self.processor.process(path) {
                    Ok(image) => {
                        stats.record(&image);
                        reporter.processed(&image);
                    }
                    Err(e) => {
                        stats.record_failure();
                        reporter.failed(path, &e);
                    }
                }
            }
        });
    }
}

/// Splits `files` into groups that are safe to run side by side.
///
/// Files whose outputs share a name (ignoring extension and case), or whose
/// output lands on another file's source, end up in one group and run one
/// after another in walk order.
pub fn group_by_output(files: Vec<PathBuf>, config: &RunConfig) -> Vec<Vec<PathBuf>> {
    let mut parent: Vec<usize> = (0..files.len()).collect();
    let mut owners: HashMap<String, usize> = HashMap::new();

    for (i, file) in files.iter().enumerate() {
        let mut keys = vec![stem_key(file)];
        if let Ok(paths) = plan_output_paths(file, config) {
            keys.push(stem_key(&paths.primary));
        }

        for key in keys {
            match owners.entry(key) {
                Entry::Occupied(owner) => union(&mut parent, *owner.get(), i),
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
            }
        }
    }

    let mut groups: Vec<Vec<PathBuf>> = Vec::new();
    let mut slots: HashMap<usize, usize> = HashMap::new();
    for (i, file) in files.into_iter().enumerate() {
        let root = find(&mut parent, i);
        let slot = *slots.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(file);
    }

    groups
}

fn stem_key(path: &Path) -> String {
    path.with_extension("").to_string_lossy().to_lowercase()
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

fn union(parent: &mut [usize], a: usize, b: usize) {
    let (a, b) = (find(parent, a), find(parent, b));
    if a != b {
        parent[a.max(b)] = a.min(b);
    }
}

pub fn validate_root(root: &Path) -> Result<()> {
    if !root.is_dir() {
        return Err(OptimizerError::DirectoryNotFound(root.to_path_buf()));
    }
    Ok(())
}
