//! AES-256 encryption of whole cache payloads.
//!
//! The plaintext is right-padded with NUL bytes to a multiple of
//! `BLOCK_SIZE`, every 16-byte AES block is encrypted independently
//! (ECB, no IV) and the raw ciphertext is returned as base64 text.
//!
//! Layout of the returned text:
//!   base64( AES-256-ECB( plaintext || NUL * pad ) )
//!
//! Encryption is deterministic: the same plaintext under the same
//! password always produces the same ciphertext.  Existing cache files
//! and the fixed test vectors rely on this, so do not copy this scheme
//! into anything new.

use std::io::Read;

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use super::kdf::derive_key;
use crate::errors::{CachetteError, Result};

/// Plaintext is padded to a multiple of this many bytes.
pub const BLOCK_SIZE: usize = 32;

/// The padding byte.
pub const PADDING: u8 = b'\0';

/// Block length of the underlying AES cipher.
const AES_BLOCK_LEN: usize = 16;

fn create_cipher(password: &[u8]) -> Aes256 {
    let key = derive_key(password);
    Aes256::new(GenericArray::from_slice(key.as_bytes()))
}

/// Number of pad bytes needed for a plaintext of `len` bytes.
///
/// Zero when `len` is already a multiple of `BLOCK_SIZE`.
fn pad_len(len: usize) -> usize {
    (BLOCK_SIZE - len % BLOCK_SIZE) % BLOCK_SIZE
}

/// Encrypt `plaintext` under `password` and return base64 text.
pub fn encrypt(plaintext: &[u8], password: &[u8]) -> String {
    let cipher = create_cipher(password);

    let mut buf = Vec::with_capacity(plaintext.len() + BLOCK_SIZE);
    buf.extend_from_slice(plaintext);
    buf.resize(plaintext.len() + pad_len(plaintext.len()), PADDING);

    for block in buf.chunks_exact_mut(AES_BLOCK_LEN) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }

    BASE64.encode(&buf)
}

/// Decrypt base64 text produced by `encrypt`.
///
/// ASCII whitespace in the input is ignored.  All trailing NUL bytes are
/// stripped from the result, so a plaintext that itself ended in NULs
/// comes back shorter.
///
/// A wrong password is not detected here: the result is simply garbage.
/// Only malformed input (bad base64, or a length that is not a whole
/// number of AES blocks) fails, with `DecodeFailure`.
pub fn decrypt(ciphertext: &[u8], password: &[u8]) -> Result<Vec<u8>> {
    let compact: Vec<u8> = ciphertext
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    let mut buf = BASE64
        .decode(&compact)
        .map_err(|_| CachetteError::DecodeFailure)?;

    if buf.len() % AES_BLOCK_LEN != 0 {
        return Err(CachetteError::DecodeFailure);
    }

    let cipher = create_cipher(password);
    for block in buf.chunks_exact_mut(AES_BLOCK_LEN) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }

    let end = buf
        .iter()
        .rposition(|&b| b != PADDING)
        .map_or(0, |last| last + 1);
    buf.truncate(end);

    Ok(buf)
}

/// Read everything from `reader` and encrypt it.
pub fn encrypt_reader<R: Read>(mut reader: R, password: &[u8]) -> Result<String> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    Ok(encrypt(&input, password))
}

/// Read base64 text from `reader` and decrypt it.
pub fn decrypt_reader<R: Read>(mut reader: R, password: &[u8]) -> Result<Vec<u8>> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    decrypt(&input, password)
}
