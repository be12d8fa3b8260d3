use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{Hasher, Result, Sha256Hasher, VerificationError};

/// Read granularity for whole-file digests; bounds memory regardless of file size.
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Hex-encoded SHA-256 of the file at `path`.
pub fn digest(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let read_err = |source| VerificationError::Read { path: path.to_path_buf(), source };

    let mut file = File::open(path).map_err(read_err)?;
    let mut hasher = Sha256Hasher::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut buffer).map_err(read_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hasher.finalize_hex())
}

/// Size of the file at `path` in bytes.
pub fn size_bytes(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|source| VerificationError::Read { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_digest_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.bin");
        std::fs::write(&path, b"").unwrap();
        assert_eq!(
            digest(&path).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_digest_spans_multiple_chunks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.bin");
        let data: Vec<u8> = (0..CHUNK_SIZE * 2 + 17).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &data).unwrap();

        assert_eq!(digest(&path).unwrap(), Sha256Hasher::digest_hex(&data));
        assert_eq!(size_bytes(&path).unwrap(), data.len() as u64);
    }

    #[test]
    fn test_digest_missing_file() {
        let dir = tempdir().unwrap();
        let err = digest(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, VerificationError::Read { .. }));
    }
}
