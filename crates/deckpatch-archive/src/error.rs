use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsafe path in archive: entry '{}' resolves to '{}'", entry.display(), resolved.display())]
    PathTraversal { entry: PathBuf, resolved: PathBuf },

    #[error("failed to open archive {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("{} is not a readable zip archive: {reason}", path.display())]
    Corrupted { path: PathBuf, reason: String },

    #[error("failed to extract '{}': {source}", path.display())]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error("staging area unavailable: {source}")]
    Staging { source: deckpatch_fs::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<deckpatch_fs::Error> for Error {
    fn from(e: deckpatch_fs::Error) -> Self {
        Self::Staging { source: e }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
