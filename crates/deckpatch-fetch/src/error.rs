//! Error types for deckpatch-fetch.

use std::io;

use deckpatch_verify::VerificationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to create temporary file: {0}")]
    TempFile(#[source] io::Error),

    #[error("failed while receiving body: {0}")]
    Body(#[source] io::Error),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

pub type Result<T> = std::result::Result<T, FetchError>;
