//! Password-to-key derivation.
//!
//! The password is hashed once with SHA-256 and the digest is used
//! directly as the AES-256 key.  There is no salt and no work factor:
//! the same password always yields the same key, which existing cache
//! files depend on.

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Length of the derived key in bytes (SHA-256 digest, 256 bits).
pub const KEY_LEN: usize = 32;

/// A 32-byte derived key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Access the raw key bytes to build a cipher.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Derive the cipher key for `password`.
pub fn derive_key(password: &[u8]) -> DerivedKey {
    let mut digest: [u8; KEY_LEN] = Sha256::digest(password).into();
    let key = DerivedKey { bytes: digest };
    digest.zeroize();
    key
}
