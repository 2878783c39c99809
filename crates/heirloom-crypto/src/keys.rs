//! Dual-key derivation
//!
//! The benefactor key and the beneficiary key are folded into a single
//! fixed-size secret. Neither key alone determines the result, and the
//! order is fixed: the benefactor key always goes in first.
//!
//! ```text
//! "heirloom/combined-key/v1"
//!   || u64be(len(benefactor))  || benefactor
//!   || u64be(len(beneficiary)) || beneficiary
//!        │
//!        ▼
//!     SHA-256 → CombinedKey (32 bytes, zeroized on drop)
//! ```
//!
//! The length prefixes keep `("ab", "c")` and `("a", "bc")` apart.

use std::fmt;

use ring::digest;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use zeroize::Zeroizing;

/// 256-bit combined key (32 bytes)
pub const COMBINED_KEY_SIZE: usize = 32;

/// Domain separation label for combined key derivation
const COMBINED_KEY_LABEL: &[u8] = b"heirloom/combined-key/v1";

/// The two parties whose keys are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    Benefactor,
    Beneficiary,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Benefactor => f.write_str("benefactor"),
            Party::Beneficiary => f.write_str("beneficiary"),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    #[error("The {0} key is empty")]
    EmptyKey(Party),
}

/// Secret derived from both parties' keys.
///
/// Lives for a single encrypt or decrypt call and is scrubbed on drop.
pub struct CombinedKey {
    bytes: Zeroizing<[u8; COMBINED_KEY_SIZE]>,
}

impl CombinedKey {
    pub fn as_bytes(&self) -> &[u8; COMBINED_KEY_SIZE] {
        &self.bytes
    }
}

impl fmt::Debug for CombinedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CombinedKey([REDACTED])")
    }
}

/// Derive the combined key from the benefactor and beneficiary keys.
///
/// Deterministic: the same pair in the same order always yields the same
/// key. Swapping the arguments yields a different key.
///
/// # Errors
///
/// - `EmptyKey`: either key is the empty string
pub fn derive_combined_key(
    benefactor: &SecretString,
    beneficiary: &SecretString,
) -> Result<CombinedKey, KeyError> {
    let benefactor = benefactor.expose_secret().as_bytes();
    let beneficiary = beneficiary.expose_secret().as_bytes();

    if benefactor.is_empty() {
        return Err(KeyError::EmptyKey(Party::Benefactor));
    }
    if beneficiary.is_empty() {
        return Err(KeyError::EmptyKey(Party::Beneficiary));
    }

    let mut ctx = digest::Context::new(&digest::SHA256);
    ctx.update(COMBINED_KEY_LABEL);
    for part in [benefactor, beneficiary] {
        ctx.update(&(part.len() as u64).to_be_bytes());
        ctx.update(part);
    }
    let digest = ctx.finish();

    let mut bytes = Zeroizing::new([0u8; COMBINED_KEY_SIZE]);
    bytes.copy_from_slice(digest.as_ref());

    Ok(CombinedKey { bytes })
}
