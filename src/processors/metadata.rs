// image-optimizer/src/processors/metadata.rs
use crate::core::Result;
use filetime::FileTime;
use std::path::Path;

/// Size and timestamps of a source file, captured before it is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFacts {
    pub size: u64,
    pub accessed: FileTime,
    pub modified: FileTime,
}

impl FileFacts {
    pub fn read(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)?;

        Ok(Self {
            size: meta.len(),
            accessed: FileTime::from_last_access_time(&meta),
            modified: FileTime::from_last_modification_time(&meta),
        })
    }

    /// Stamps the captured access and modification times onto `path`.
    pub fn apply_times(&self, path: &Path) -> Result<()> {
        filetime::set_file_times(path, self.accessed, self.modified)?;
        log::debug!("Restored timestamps on {}", path.display());
        Ok(())
    }
}

pub fn file_size(path: &Path) -> Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}
