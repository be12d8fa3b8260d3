//! First-snapshot-wins backups.
//!
//! A backup that already exists is never overwritten: a second snapshot taken
//! after a bad patch would capture the already-modified file.

use crate::copy::{copy_dir_merge, copy_file_preserving};
use crate::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const BACKUP_SUFFIX: &str = ".bak";

const PARTIAL_SUFFIX: &str = ".deckpatch-partial";
const UNNAMED_TREE: &str = "tree";

/// `path` with [`BACKUP_SUFFIX`] appended to its full file name.
pub fn backup_path(path: impl AsRef<Path>) -> PathBuf {
    let mut name = OsString::from(path.as_ref().as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Where [`backup_tree`] puts the snapshot of `dir` under `backup_root`.
pub fn tree_snapshot_path(backup_root: impl AsRef<Path>, dir: impl AsRef<Path>) -> PathBuf {
    let name = dir
        .as_ref()
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| UNNAMED_TREE.into());
    backup_root.as_ref().join(name)
}

/// Snapshot `path` to `path.bak` unless a backup already exists.
///
/// Returns the backup path either way.
pub fn backup_file(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let bak = backup_path(path);

    if bak.exists() {
        debug!(backup = %bak.display(), "backup already present; keeping first snapshot");
        return Ok(bak);
    }

    copy_via_partial(path, &bak)?;
    info!(original = %path.display(), backup = %bak.display(), "created backup");
    Ok(bak)
}

/// Copy `path.bak` back over `path`.
///
/// Returns `false` without touching `path` when there is no backup.
pub fn restore_file(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let bak = backup_path(path);

    if !bak.is_file() {
        debug!(path = %path.display(), "no backup to restore");
        return Ok(false);
    }

    copy_via_partial(&bak, path)?;
    info!(path = %path.display(), "restored from backup");
    Ok(true)
}

/// Snapshot `src_dir` into `backup_root/<src_dir name>` unless `backup_root` exists.
///
/// The root is created even when `src_dir` is missing, so a later call will
/// not snapshot a directory that appeared after the first attempt.
pub fn backup_tree(src_dir: impl AsRef<Path>, backup_root: impl AsRef<Path>) -> Result<PathBuf> {
    let src_dir = src_dir.as_ref();
    let backup_root = backup_root.as_ref();

    if backup_root.exists() {
        debug!(root = %backup_root.display(), "tree backup already present");
        return Ok(backup_root.to_path_buf());
    }

    fs::create_dir_all(backup_root).map_err(|e| Error::Write {
        path:   backup_root.to_path_buf(),
        source: e,
    })?;

    if src_dir.is_dir() {
        let snapshot = tree_snapshot_path(backup_root, src_dir);
        let files = copy_dir_merge(src_dir, &snapshot)?;
        info!(src = %src_dir.display(), snapshot = %snapshot.display(), files, "created tree backup");
    } else {
        debug!(src = %src_dir.display(), "nothing to snapshot; created empty backup root");
    }

    Ok(backup_root.to_path_buf())
}

/// Merge the snapshot of `dst_dir` held under `backup_root` back over `dst_dir`.
///
/// Files that only exist in `dst_dir` survive. Returns `false` when there is
/// no snapshot.
pub fn restore_tree(backup_root: impl AsRef<Path>, dst_dir: impl AsRef<Path>) -> Result<bool> {
    let dst_dir = dst_dir.as_ref();
    let snapshot = tree_snapshot_path(backup_root, dst_dir);

    if !snapshot.is_dir() {
        debug!(snapshot = %snapshot.display(), "no tree snapshot to restore");
        return Ok(false);
    }

    let files = copy_dir_merge(&snapshot, dst_dir)?;
    info!(dst = %dst_dir.display(), files, "restored tree from backup");
    Ok(true)
}

/// Copy to a sibling temp name, then rename into place, so an interrupted copy
/// never leaves a truncated file under the final name.
fn copy_via_partial(src: &Path, dest: &Path) -> Result<()> {
    let mut partial = OsString::from(dest.as_os_str());
    partial.push(PARTIAL_SUFFIX);
    let partial = PathBuf::from(partial);

    if let Err(e) = copy_file_preserving(src, &partial) {
        let _ = fs::remove_file(&partial);
        return Err(e);
    }

    fs::rename(&partial, dest).map_err(|e| {
        let _ = fs::remove_file(&partial);
        Error::Write {
            path:   dest.to_path_buf(),
            source: e,
        }
    })
}
