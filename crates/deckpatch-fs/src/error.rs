use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from:   PathBuf,
        to:     PathBuf,
        source: io::Error,
    },

    #[error("{} is held by another deckpatch operation", path.display())]
    Locked { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
