// image-optimizer/src/processors/walker.rs
use crate::core::{Result, RunConfig};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a walk found besides the files themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkReport {
    pub files: usize,
    pub excluded_dirs: usize,
    pub errors: u64,
}

/// Finds candidate images under a root directory.
pub struct Walker<'a> {
    config: &'a RunConfig,
}

impl<'a> Walker<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// Calls `on_file` for every file with a wanted extension, in name order.
    ///
    /// Excluded directories are checked before they are entered. Entries that
    /// cannot be read are logged and skipped along with anything below them.
    pub fn walk<F>(&self, root: &Path, mut on_file: F) -> Result<WalkReport>
    where
        F: FnMut(PathBuf),
    {
        let root = std::path::absolute(root)?;
        let recursive = self.config.recursive;
        let mut report = WalkReport::default();
        let mut excluded_dirs = 0;

        let walker = WalkDir::new(&root)
            .min_depth(1)
            .max_depth(if recursive { usize::MAX } else { 1 })
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let skip = recursive
                    && entry.depth() > 0
                    && entry.file_type().is_dir()
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| self.config.is_excluded_dir(name));

                if skip {
                    log::info!("Skipping excluded directory: {}", entry.path().display());
                    excluded_dirs += 1;
                }
                !skip
            });

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.config.wants_extension(entry.path()) {
                        report.files += 1;
                        on_file(entry.into_path());
                    }
                }
                Err(err) => {
                    log::warn!("Skipping unreadable entry: {}", err);
                    report.errors += 1;
                }
            }
        }

        report.excluded_dirs = excluded_dirs;
        log::debug!(
            "Walked {}: {} file(s), {} excluded dir(s), {} error(s)",
            root.display(),
            report.files,
            report.excluded_dirs,
            report.errors
        );

        Ok(report)
    }

    pub fn collect(&self, root: &Path) -> Result<(Vec<PathBuf>, WalkReport)> {
        let mut files = Vec::new();
        let report = self.walk(root, |path| files.push(path))?;
        Ok((files, report))
    }
}
