// image-optimizer/src/utils/paths.rs
use crate::core::{OptimizerError, Result, RunConfig, SaveLocation, RESIZED_DIR, WEBP_EXT};
use crate::utils::normalize_basename;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tempfile::NamedTempFile;

const IO_ATTEMPTS: u32 = 3;
const IO_BACKOFF: Duration = Duration::from_millis(50);

/// Where one source file's outputs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub primary: PathBuf,
    pub webp: Option<PathBuf>,
}

/// Works out the output paths for `source` without touching the filesystem.
pub fn plan_output_paths(source: &Path, config: &RunConfig) -> Result<OutputPaths> {
    let primary = match (config.save_location, config.overwrite_original) {
        (SaveLocation::Same, true) => source.to_path_buf(),
        (SaveLocation::Same, false) => parent_of(source).join(output_file_name(source, config)?),
        (SaveLocation::Resized, _) => parent_of(source)
            .join(RESIZED_DIR)
            .join(output_file_name(source, config)?),
    };

    // A `.webp` source already is its own WebP copy.
    let webp = config
        .convert_to_webp
        .then(|| primary.with_extension(WEBP_EXT))
        .filter(|webp| webp != &primary);

    Ok(OutputPaths { primary, webp })
}

/// Like [`plan_output_paths`], but also creates the `resized` folder when
/// that placement is configured.
pub fn resolve_output_paths(source: &Path, config: &RunConfig) -> Result<OutputPaths> {
    let paths = plan_output_paths(source, config)?;
    if config.save_location == SaveLocation::Resized {
        std::fs::create_dir_all(parent_of(&paths.primary))?;
    }
    Ok(paths)
}

/// `stem + suffix + .ext`, with the extension lower-cased and the stem
/// normalized when configured.
pub fn output_file_name(source: &Path, config: &RunConfig) -> Result<String> {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            OptimizerError::InvalidParameter(format!("Invalid file name: {}", source.display()))
        })?;

    let base = if config.normalize_basename {
        normalize_basename(stem)
    } else {
        stem.to_string()
    };

    let ext = source
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();

    Ok(format!("{}{}{}", base, config.suffix, ext))
}

fn parent_of(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

/// Writes `data` to a temporary sibling and moves it over `path`, so readers
/// never see a half-written file.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let mut tmp = NamedTempFile::new_in(parent_of(path))?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;

    let mut attempt = 1;
    loop {
        match tmp.persist(path) {
            Ok(_) => return Ok(()),
            Err(e) if attempt < IO_ATTEMPTS && is_transient(&e.error) => {
                log::debug!("Retrying write of {}: {}", path.display(), e.error);
                tmp = e.file;
                attempt += 1;
                thread::sleep(IO_BACKOFF);
            }
            Err(e) => return Err(e.error.into()),
        }
    }
}

/// Runs a filesystem step, retrying a couple of times on transient errors.
pub fn retry_io<T, F>(what: &str, path: &Path, mut op: F) -> Result<T>
where
    F: FnMut() -> io::Result<T>,
{
    let mut attempt = 1;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) if attempt < IO_ATTEMPTS && is_transient(&e) => {
                log::debug!("Retrying {} of {}: {}", what, path.display(), e);
                attempt += 1;
                thread::sleep(IO_BACKOFF);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::TimedOut
            | io::ErrorKind::ResourceBusy
    )
}
