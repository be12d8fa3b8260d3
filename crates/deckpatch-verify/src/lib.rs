//! Content digests for mod archives and game binaries.
//!
//! Provides incremental hashing for data streaming through a reader and a
//! chunked whole-file digest used to show users a trust signal before they
//! install anything.
//!
//! # Example
//!
//! ```
//! use std::io::Read;
//! use deckpatch_verify::{Sha256Hasher, VerifiedReader};
//!
//! let mut reader = VerifiedReader::new(&b"hello world"[..], Sha256Hasher::new());
//! let mut sink = Vec::new();
//! reader.read_to_end(&mut sink).unwrap();
//!
//! assert_eq!(
//!     reader.finalize_hex(),
//!     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
//! );
//! ```

pub use self::digest::{CHUNK_SIZE, digest, size_bytes};
pub use self::error::{Result, VerificationError};
pub use self::hasher::{Hasher, Sha256Hasher};
pub use self::reader::VerifiedReader;

mod digest;
mod error;
mod hasher;
mod reader;
