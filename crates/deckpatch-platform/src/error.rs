use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("command failed to start: {cmd}, source: {source}")]
    CommandFailed { cmd: String, source: std::io::Error },

    #[error("command {cmd} did not finish within {}s", after.as_secs())]
    TimedOut { cmd: String, after: Duration },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
