//! Stable hash codes
//!
//! The standard library leaves the algorithm behind `DefaultHasher`
//! unspecified, so hash codes printed in a failure message could change
//! between toolchains. [`StableHasher`] feeds the `Hash` stream into SHA-256
//! and folds the digest to 64 bits, which keeps codes reproducible.

use std::hash::{Hash, Hasher};

use sha2::{Digest, Sha256};

/// A `Hasher` over SHA-256
#[derive(Clone, Default)]
pub struct StableHasher {
    digest: Sha256,
}

impl StableHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Hasher for StableHasher {
    fn write(&mut self, bytes: &[u8]) {
        self.digest.update(bytes);
    }

    fn finish(&self) -> u64 {
        let digest = self.digest.clone().finalize();
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(prefix)
    }
}

/// Hash code of `value` through [`StableHasher`]
pub fn stable_hash<H: Hash + ?Sized>(value: &H) -> u64 {
    let mut hasher = StableHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
