//! Password-based authenticated encryption for backup payloads.
//!
//! # Sealed payload layout
//!
//! ```text
//! [Nonce: 12 bytes] [Ciphertext + Tag]
//! ```
//!
//! The key is a single SHA-256 of the password — no per-backup salt, so the
//! same password always derives the same key. Changing that would break
//! every existing backup; it stays a product-owner decision.

use aes_gcm::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Nonce size (96 bits for AES-GCM).
const NONCE_SIZE: usize = 12;

/// Derive a 256-bit key from the password.
fn derive_key(password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Encrypt `plaintext` under `password` with AES-256-GCM.
///
/// The random nonce is prepended to the returned ciphertext.
pub fn seal(plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
    let key = derive_key(password);
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| Error::Export(format!("Cipher init failed: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| Error::Export(format!("Encryption failed: {}", e)))?;

    let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Decrypt a sealed payload produced by [`seal`].
///
/// # Errors
///
/// Returns [`Error::AuthenticationFailed`] for a wrong password and for
/// tampered or truncated ciphertext alike; the cases are intentionally
/// indistinguishable.
pub fn open(sealed: &[u8], password: &str) -> Result<Vec<u8>> {
    if sealed.len() < NONCE_SIZE {
        return Err(Error::AuthenticationFailed);
    }

    let key = derive_key(password);
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|_| Error::AuthenticationFailed)?;

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_SIZE);
    let nonce = Nonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| Error::AuthenticationFailed)
}
