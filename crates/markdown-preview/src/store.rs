use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::Builder;

use crate::error::{PreviewError, PreviewResult};

pub const DEFAULT_PREFIX: &str = "mdp";
pub const DEFAULT_SUFFIX: &str = ".html";

/// Write-once temporary files for rendered documents.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(env::temp_dir())
    }
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Allocate an empty file with a name no concurrent caller can receive.
    ///
    /// The file is persisted, so it stays on disk until [`FileStore::remove`]
    /// is called.
    pub fn create_unique(&self, prefix: &str, suffix: &str) -> PreviewResult<PathBuf> {
        let create_error = |source| PreviewError::TempFileCreate {
            dir: self.dir.clone(),
            source,
        };

        let tmp = Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile_in(&self.dir)
            .map_err(create_error)?;

        tmp.into_temp_path()
            .keep()
            .map_err(|err| create_error(err.error))
    }

    /// Replace the contents of `path`.
    pub fn write(&self, path: &Path, contents: &[u8]) -> PreviewResult<()> {
        fs::write(path, contents).map_err(|source| PreviewError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Delete `path`. A file that is already gone is reported as an error too.
    pub fn remove(&self, path: &Path) -> PreviewResult<()> {
        fs::remove_file(path).map_err(|source| PreviewError::Cleanup {
            path: path.to_path_buf(),
            source,
        })
    }
}
