//! Locating external executables.

use std::path::{Path, PathBuf};
use tracing::debug;

/// First candidate that resolves to an executable.
///
/// Each candidate is tried through the search path first and then as a
/// literal file path, so both bare names (`7z`) and absolute install
/// locations work.
pub fn find_executable<I, S>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for candidate in candidates {
        let candidate = candidate.as_ref();
        if let Ok(found) = which::which(candidate) {
            debug!(candidate, found = %found.display(), "resolved via search path");
            return Some(found);
        }
        let literal = Path::new(candidate);
        if literal.is_file() {
            debug!(candidate, "resolved as literal path");
            return Some(literal.to_path_buf());
        }
    }
    None
}
