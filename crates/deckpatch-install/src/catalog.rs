use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use tracing::debug;

/// A mod archive on disk. Never modified; the digest is computed once.
#[derive(Debug)]
pub struct ModArchive {
    path:   PathBuf,
    digest: OnceCell<String>,
}

impl ModArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path:   path.into(),
            digest: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name shown to users.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn size_bytes(&self) -> deckpatch_verify::Result<u64> {
        deckpatch_verify::size_bytes(&self.path)
    }

    /// Hex SHA-256 of the archive.
    pub fn digest(&self) -> deckpatch_verify::Result<&str> {
        self.digest
            .get_or_try_init(|| deckpatch_verify::digest(&self.path))
            .map(String::as_str)
    }
}

/// Zip archives bundled in a directory, sorted by file name.
#[derive(Debug, Default)]
pub struct ModCatalog {
    mods: Vec<ModArchive>,
}

impl ModCatalog {
    /// A missing directory is an empty catalog.
    pub fn scan(dir: impl AsRef<Path>) -> deckpatch_fs::Result<Self> {
        let dir = dir.as_ref();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(dir = %dir.display(), "mods directory missing");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(deckpatch_fs::Error::Read {
                    path:   dir.to_path_buf(),
                    source: e,
                });
            }
        };

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| deckpatch_fs::Error::Read {
                path:   dir.to_path_buf(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_file() && is_zip(&path) {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        debug!(dir = %dir.display(), count = paths.len(), "scanned mods");
        Ok(Self {
            mods: paths.into_iter().map(ModArchive::new).collect(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModArchive> {
        self.mods.iter()
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    /// Look up a mod by file name, with or without the `.zip` extension.
    pub fn find(&self, name: &str) -> Option<&ModArchive> {
        self.mods.iter().find(|m| {
            let file = m.name();
            file == name || Path::new(&file).file_stem().is_some_and(|stem| stem == name)
        })
    }
}

fn is_zip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckpatch_verify::Sha256Hasher;
    use tempfile::tempdir;

    #[test]
    fn test_scan_lists_zips_sorted() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b_deck.zip"), b"b").unwrap();
        std::fs::write(dir.path().join("A_Jokers.ZIP"), b"a").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("folder.zip")).unwrap();

        let catalog = ModCatalog::scan(dir.path()).unwrap();
        let names: Vec<_> = catalog.iter().map(ModArchive::name).collect();
        assert_eq!(names, vec!["A_Jokers.ZIP", "b_deck.zip"]);
        assert!(catalog.find("b_deck").is_some());
        assert!(catalog.find("b_deck.zip").is_some());
        assert!(catalog.find("readme").is_none());
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let catalog = ModCatalog::scan(dir.path().join("missing")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_digest_is_cached() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deck.zip");
        std::fs::write(&path, b"first").unwrap();

        let archive = ModArchive::new(&path);
        let first = archive.digest().unwrap().to_string();
        assert_eq!(first, Sha256Hasher::digest_hex(b"first"));
        assert_eq!(archive.size_bytes().unwrap(), 5);

        std::fs::write(&path, b"second").unwrap();
        assert_eq!(archive.digest().unwrap(), first);
    }
}
