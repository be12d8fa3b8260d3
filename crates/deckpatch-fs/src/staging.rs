use crate::{Error, Result};
use std::path::Path;
use tempfile::TempDir;
use tracing::debug;

/// Scratch directory owned by a single operation.
///
/// The directory is removed when the area is dropped, whether the operation
/// succeeded or not. Removal failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct StagingArea {
    dir: Option<TempDir>,
}

impl StagingArea {
    /// Create a uniquely named directory under the system temp dir.
    pub fn new(prefix: &str) -> Result<Self> {
        Self::in_dir(std::env::temp_dir(), prefix)
    }

    pub fn in_dir(parent: impl AsRef<Path>, prefix: &str) -> Result<Self> {
        let parent = parent.as_ref();
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(parent)
            .map_err(|e| Error::Write {
                path:   parent.to_path_buf(),
                source: e,
            })?;
        debug!(path = %dir.path().display(), "created staging area");
        Ok(Self { dir: Some(dir) })
    }

    pub fn path(&self) -> &Path {
        // only `drop` takes the dir out
        self.dir.as_ref().map(TempDir::path).unwrap_or(Path::new(""))
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            match dir.close() {
                Ok(()) => debug!(path = %path.display(), "removed staging area"),
                Err(e) => debug!(path = %path.display(), error = %e, "left staging area behind"),
            }
        }
    }
}
