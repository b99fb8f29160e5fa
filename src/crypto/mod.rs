//! Cryptographic primitives for Cachette.
//!
//! This module provides:
//! - SHA-256 password-to-key derivation (`kdf`)
//! - AES-256 block encryption with NUL padding and base64 transport (`encryption`)

pub mod encryption;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key};
pub use encryption::{decrypt, decrypt_reader, encrypt, encrypt_reader, BLOCK_SIZE, PADDING};
pub use kdf::{derive_key, DerivedKey, KEY_LEN};
