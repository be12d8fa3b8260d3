//! Downloading mod archives from a URL.
//!
//! The body is streamed into a `.zip`-suffixed temporary file and hashed on
//! the way through, so the digest is available without a second read. The
//! file is removed when the returned [`DownloadedArchive`] is dropped.

mod download;
mod error;
mod options;

pub use download::{DownloadedArchive, download};
pub use error::{FetchError, Result};
pub use options::FetchOptions;
