//! ChaCha20-Poly1305 authenticated encryption of seed phrases
//!
//! The combined key is stretched with PBKDF2-HMAC-SHA256 over a fresh
//! random salt, then used to seal the phrase under a fresh random nonce.
//! Salt, nonce and iteration count travel in the payload, so decryption
//! needs nothing but the payload and the two original keys.
//!
//! The phrase is framed before sealing:
//!
//! ```text
//! u32be(len) || phrase || 0x00 padding up to a multiple of 64 bytes
//! ```
//!
//! so the ciphertext length only reveals which 64-byte bucket the
//! phrase falls into.
//!
//! Every decryption failure is reported as the same
//! [`CipherError::DecryptionFailed`]. A wrong key, a flipped bit and a
//! garbled payload cannot be told apart by message, and a payload that
//! does not even parse still pays for one key stretch.
//!
//! That stretch runs at this cipher's iteration count, while a parseable
//! payload is stretched at the count it carries. The costs match for
//! payloads this cipher produced and differ otherwise; the submitter
//! picked the count, so the difference tells them nothing new.

use std::num::NonZeroU32;

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    ChaCha20Poly1305, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use ring::pbkdf2;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::keys::CombinedKey;
use crate::payload::{EncryptedPayload, MAX_ITERATIONS, MIN_ITERATIONS, NONCE_SIZE, SALT_SIZE};

/// 256-bit AEAD key (32 bytes)
pub const KEY_SIZE: usize = 32;
/// Plaintext frames are padded to a multiple of this
pub const PADDING_BLOCK: usize = 64;
/// PBKDF2 iterations used when none are configured
pub const DEFAULT_ITERATIONS: u32 = 600_000;

const LENGTH_PREFIX_SIZE: usize = 4;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Decryption failed - wrong keys or corrupted data")]
    DecryptionFailed,

    #[error("Iteration count {0} is outside 1000..=10000000")]
    InvalidIterations(u32),
}

/// Seals and opens seed phrases with a fixed key-stretching cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCipher {
    iterations: NonZeroU32,
}

impl Default for SeedCipher {
    fn default() -> Self {
        Self {
            iterations: NonZeroU32::MIN.saturating_add(DEFAULT_ITERATIONS - 1),
        }
    }
}

impl SeedCipher {
    pub fn new(iterations: u32) -> Result<Self, CipherError> {
        let iterations = checked_iterations(iterations).ok_or(CipherError::InvalidIterations(iterations))?;
        Ok(Self { iterations })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations.get()
    }

    /// Encrypt a phrase under the combined key.
    ///
    /// Draws a new salt and nonce from the OS on every call.
    pub fn encrypt(&self, key: &CombinedKey, plaintext: &[u8]) -> Result<EncryptedPayload, CipherError> {
        let mut salt = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut salt);
        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce);

        let framed = frame(plaintext)?;
        let aead_key = stretch(key, &salt, self.iterations);
        let cipher = ChaCha20Poly1305::new_from_slice(&aead_key[..])
            .map_err(|_| CipherError::EncryptionFailed)?;

        let mut payload = EncryptedPayload {
            iterations: self.iterations.get(),
            salt,
            nonce,
            ciphertext: Vec::new(),
        };
        let header = payload.header();
        payload.ciphertext = cipher
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: &framed,
                    aad: header.as_bytes(),
                },
            )
            .map_err(|_| CipherError::EncryptionFailed)?;

        Ok(payload)
    }

    /// Decrypt a parsed payload.
    ///
    /// Uses the iteration count recorded in the payload, not the one this
    /// cipher was built with.
    pub fn decrypt(
        &self,
        key: &CombinedKey,
        payload: &EncryptedPayload,
    ) -> Result<Zeroizing<Vec<u8>>, CipherError> {
        let Some(iterations) = checked_iterations(payload.iterations) else {
            self.burn(key);
            return Err(CipherError::DecryptionFailed);
        };

        let aead_key = stretch(key, &payload.salt, iterations);
        let cipher = ChaCha20Poly1305::new_from_slice(&aead_key[..])
            .map_err(|_| CipherError::DecryptionFailed)?;

        let header = payload.header();
        let framed = cipher
            .decrypt(
                Nonce::from_slice(&payload.nonce),
                Payload {
                    msg: &payload.ciphertext,
                    aad: header.as_bytes(),
                },
            )
            .map(Zeroizing::new)
            .map_err(|_| CipherError::DecryptionFailed)?;

        unframe(&framed).ok_or(CipherError::DecryptionFailed)
    }

    /// Decrypt the text form of a payload.
    pub fn decrypt_text(&self, key: &CombinedKey, text: &str) -> Result<Zeroizing<Vec<u8>>, CipherError> {
        match EncryptedPayload::parse(text) {
            Ok(payload) => self.decrypt(key, &payload),
            Err(err) => {
                tracing::debug!(%err, "Rejecting malformed payload");
                self.burn(key);
                Err(CipherError::DecryptionFailed)
            }
        }
    }

    /// One key stretch with a throwaway salt, result discarded.
    fn burn(&self, key: &CombinedKey) {
        drop(stretch(key, &[0u8; SALT_SIZE], self.iterations));
    }
}

fn checked_iterations(iterations: u32) -> Option<NonZeroU32> {
    if (MIN_ITERATIONS..=MAX_ITERATIONS).contains(&iterations) {
        NonZeroU32::new(iterations)
    } else {
        None
    }
}

fn stretch(key: &CombinedKey, salt: &[u8], iterations: NonZeroU32) -> Zeroizing<[u8; KEY_SIZE]> {
    let mut out = Zeroizing::new([0u8; KEY_SIZE]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        key.as_bytes(),
        &mut out[..],
    );
    out
}

fn frame(plaintext: &[u8]) -> Result<Zeroizing<Vec<u8>>, CipherError> {
    let len = u32::try_from(plaintext.len()).map_err(|_| CipherError::EncryptionFailed)?;
    let framed_len = (LENGTH_PREFIX_SIZE + plaintext.len()).div_ceil(PADDING_BLOCK) * PADDING_BLOCK;

    // Capacity is reserved up front so the buffer never reallocates and
    // leaves an unscrubbed copy behind.
    let mut framed = Zeroizing::new(Vec::with_capacity(framed_len));
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(plaintext);
    framed.resize(framed_len, 0);
    Ok(framed)
}

fn unframe(framed: &[u8]) -> Option<Zeroizing<Vec<u8>>> {
    if framed.len() % PADDING_BLOCK != 0 || framed.len() < LENGTH_PREFIX_SIZE {
        return None;
    }
    let (prefix, rest) = framed.split_at(LENGTH_PREFIX_SIZE);
    let len = u32::from_be_bytes(prefix.try_into().ok()?) as usize;
    if len > rest.len() {
        return None;
    }
    let (body, padding) = rest.split_at(len);
    if padding.iter().any(|&b| b != 0) {
        return None;
    }
    Some(Zeroizing::new(body.to_vec()))
}
