use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve an archive entry name against `root`, refusing anything that would
/// land outside it.
///
/// Both `/` and `\` are treated as separators. Absolute entries and entries
/// whose `..` segments climb above `root` fail with [`Error::PathTraversal`].
pub fn safe_join(root: impl AsRef<Path>, entry: impl AsRef<Path>) -> Result<PathBuf> {
    let entry = entry.as_ref();
    let root = std::path::absolute(root.as_ref())?;

    let traversal = |root: &Path| Error::PathTraversal {
        entry: entry.to_path_buf(),
        resolved: resolve_lexically(&root.join(entry)),
    };

    let relative = normalize_entry(entry).ok_or_else(|| traversal(&root))?;
    let resolved = root.join(relative);

    if !resolved.starts_with(&root) {
        return Err(traversal(&root));
    }

    Ok(resolved)
}

/// Cheap screen for entry names that must never be written: leading
/// separators and `..` segments.
pub fn is_unsafe_entry_name(name: &str) -> bool {
    name.starts_with(['/', '\\']) || name.split(['/', '\\']).any(|segment| segment == "..")
}

/// Normalize an entry name to plain relative components.
///
/// Returns `None` for absolute names or names that climb above their root.
fn normalize_entry(entry: &Path) -> Option<PathBuf> {
    let unified = entry.to_string_lossy().replace('\\', "/");
    if unified.starts_with('/') {
        return None;
    }

    let mut parts: Vec<&str> = Vec::new();
    for part in unified.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            part => parts.push(part),
        }
    }

    let relative: PathBuf = parts.iter().collect();
    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    plain.then_some(relative)
}

/// Lexical resolution of `.` and `..`, for error messages.
fn resolve_lexically(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::CurDir => {}
            other => result.push(other.as_os_str()),
        }
    }
    result
}
