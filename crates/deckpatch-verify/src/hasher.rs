use sha2::{Digest, Sha256};

/// Incremental digest fed from a byte stream.
pub trait Hasher: Send {
    fn update(&mut self, data: &[u8]);

    fn finalize(self) -> Vec<u8>;

    /// Lowercase hex of [`Hasher::finalize`].
    fn finalize_hex(self) -> String
    where
        Self: Sized,
    {
        hex::encode(self.finalize())
    }
}

/// SHA-256, the digest shown next to every mod archive.
pub struct Sha256Hasher(Sha256);

impl Hasher for Sha256Hasher {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self) -> Vec<u8> {
        self.0.finalize().to_vec()
    }
}

impl Default for Sha256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha256Hasher {
    pub fn new() -> Self {
        Self(Sha256::new())
    }

    /// One-shot digest of an in-memory buffer.
    pub fn digest(data: &[u8]) -> Vec<u8> {
        Sha256::digest(data).to_vec()
    }

    pub fn digest_hex(data: &[u8]) -> String {
        hex::encode(Self::digest(data))
    }
}
