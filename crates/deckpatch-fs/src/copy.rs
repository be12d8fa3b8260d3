use crate::{Error, Result};
use filetime::FileTime;
use std::fs;
use std::path::Path;

/// Copy a single file, carrying its permissions and access/modification times.
pub fn copy_file_preserving(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<u64> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    let bytes = fs::copy(src, dest).map_err(|e| Error::Copy {
        from:   src.to_path_buf(),
        to:     dest.to_path_buf(),
        source: e,
    })?;

    let meta = fs::metadata(src).map_err(|e| Error::Read {
        path:   src.to_path_buf(),
        source: e,
    })?;
    filetime::set_file_times(
        dest,
        FileTime::from_last_access_time(&meta),
        FileTime::from_last_modification_time(&meta),
    )
    .map_err(|e| Error::Write {
        path:   dest.to_path_buf(),
        source: e,
    })?;

    Ok(bytes)
}

/// Recursively copy the contents of `src` into `dest`.
///
/// Same-named files at the destination are overwritten; anything that only
/// exists at the destination is left alone. Returns the number of files copied.
pub fn copy_dir_merge(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<usize> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    if !dest.exists() {
        fs::create_dir_all(dest).map_err(|e| Error::Write {
            path:   dest.to_path_buf(),
            source: e,
        })?;
    }

    let mut copied = 0;
    for entry in fs::read_dir(src).map_err(|e| Error::Read {
        path:   src.to_path_buf(),
        source: e,
    })? {
        let entry = entry.map_err(|e| Error::Read {
            path:   src.to_path_buf(),
            source: e,
        })?;

        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        // follows symlinks so linked asset folders are copied by content
        let meta = fs::metadata(&src_path).map_err(|e| Error::Read {
            path:   src_path.clone(),
            source: e,
        })?;

        if meta.is_dir() {
            copied += copy_dir_merge(&src_path, &dest_path)?;
        } else {
            copy_file_preserving(&src_path, &dest_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}
