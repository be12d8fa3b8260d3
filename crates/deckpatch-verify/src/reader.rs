use std::io::{self, Read};

use crate::{Hasher, Result, VerificationError};

/// Streaming reader that hashes data as it passes through.
pub struct VerifiedReader<R, H> {
    reader: R,
    hasher: H,
    bytes:  u64,
}

impl<R, H> VerifiedReader<R, H> {
    pub fn new(reader: R, hasher: H) -> Self {
        Self { reader, hasher, bytes: 0 }
    }

    /// Number of bytes that have passed through so far.
    pub fn bytes_read(&self) -> u64 { self.bytes }
}

impl<R, H: Hasher> VerifiedReader<R, H> {
    pub fn finalize(self) -> Vec<u8> { self.hasher.finalize() }

    pub fn finalize_hex(self) -> String { self.hasher.finalize_hex() }

    /// Finalize against an expected hex digest (case-insensitive).
    pub fn finish(self, expected: &str) -> Result<()> {
        let actual = self.finalize_hex();
        if actual.eq_ignore_ascii_case(expected) {
            Ok(())
        } else {
            Err(VerificationError::Mismatch {
                expected: expected.to_string(),
                actual,
            })
        }
    }
}

impl<R: Read, H: Hasher> Read for VerifiedReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if n > 0 {
            self.hasher.update(&buf[..n]);
            self.bytes += n as u64;
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sha256Hasher;
    use std::io::Cursor;

    #[test]
    fn test_verified_reader_success() {
        let data = b"test data for verification";
        let expected = Sha256Hasher::digest_hex(data);

        let mut verified = VerifiedReader::new(Cursor::new(data), Sha256Hasher::new());
        let mut sink = Vec::new();
        io::copy(&mut verified, &mut sink).unwrap();

        assert_eq!(sink, data);
        assert_eq!(verified.bytes_read(), data.len() as u64);
        verified.finish(&expected.to_uppercase()).unwrap();
    }

    #[test]
    fn test_verified_reader_hash_mismatch() {
        let mut verified = VerifiedReader::new(Cursor::new(b"test data"), Sha256Hasher::new());
        io::copy(&mut verified, &mut io::sink()).unwrap();

        let wrong = "00".repeat(32);
        match verified.finish(&wrong) {
            Err(VerificationError::Mismatch { expected, actual }) => {
                assert_eq!(expected, wrong);
                assert_ne!(actual, wrong);
            }
            other => panic!("expected Mismatch, got {other:?}"),
        }
    }
}
