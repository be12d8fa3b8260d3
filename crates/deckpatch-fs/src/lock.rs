use crate::{Error, Result};
use fs2::FileExt;
use std::fs::File;
use std::path::Path;

/// Advisory exclusive lock on a file, released on drop.
///
/// Install and restore do not lock on their own; a caller that allows
/// concurrent actions holds one of these per game root.
pub struct InstallLock {
    file: File,
}

impl InstallLock {
    fn open(path: &Path) -> Result<File> {
        File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| Error::Write {
                path:   path.to_path_buf(),
                source: e,
            })
    }

    /// Take the lock, or fail with [`Error::Locked`] if it is already held.
    pub fn try_acquire(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = Self::open(&path)?;
        if file.try_lock_exclusive().is_err() {
            return Err(Error::Locked { path });
        }
        Ok(Self { file })
    }
}

impl Drop for InstallLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_second_try_acquire_is_refused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".deckpatch.lock");

        let held = InstallLock::try_acquire(&path).unwrap();
        let err = InstallLock::try_acquire(&path).err().unwrap();
        assert!(matches!(err, Error::Locked { .. }));

        drop(held);
        InstallLock::try_acquire(&path).unwrap();
    }
}
