//! Transportable text form of an encrypted seed phrase
//!
//! ```text
//! hl1.<iterations>.<salt>.<nonce>.<ciphertext+tag>
//! ```
//!
//! `hl1` names the whole suite: combined key v1, PBKDF2-HMAC-SHA256 key
//! stretching, ChaCha20-Poly1305 with a 64-byte padding frame. Binary
//! fields are base64url without padding, so the text only contains
//! `[A-Za-z0-9_.-]` and survives any text transport unescaped.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use thiserror::Error;

/// Scheme identifier, first field of every payload
pub const SCHEME: &str = "hl1";
/// 128-bit salt (16 bytes)
pub const SALT_SIZE: usize = 16;
/// 96-bit nonce (12 bytes)
pub const NONCE_SIZE: usize = 12;
/// Poly1305 tag (16 bytes)
pub const TAG_SIZE: usize = 16;
/// Lowest accepted PBKDF2 iteration count
pub const MIN_ITERATIONS: u32 = 1_000;
/// Highest accepted PBKDF2 iteration count
pub const MAX_ITERATIONS: u32 = 10_000_000;

const FIELD_COUNT: usize = 5;
const SEPARATOR: char = '.';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Unknown payload scheme")]
    UnknownScheme,

    #[error("Expected 5 fields, got {0}")]
    FieldCount(usize),

    #[error("Iteration count is not a number in 1000..=10000000")]
    InvalidIterations,

    #[error("Invalid base64 in {0} field")]
    Encoding(&'static str),

    #[error("Invalid {field} length: expected {expected}, got {actual}")]
    FieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Ciphertext is shorter than the authentication tag")]
    Truncated,
}

/// Salt, nonce and sealed phrase bundled together.
///
/// Everything needed to decrypt except the two keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// PBKDF2 iteration count used when sealing
    pub iterations: u32,
    /// Key stretching salt
    pub salt: [u8; SALT_SIZE],
    /// ChaCha20-Poly1305 nonce
    pub nonce: [u8; NONCE_SIZE],
    /// Sealed frame including the 16-byte Poly1305 tag
    pub ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    /// Header text bound into the AEAD as associated data.
    pub fn header(&self) -> String {
        format!("{SCHEME}{SEPARATOR}{}", self.iterations)
    }

    pub fn to_text(&self) -> String {
        format!(
            "{header}{SEPARATOR}{salt}{SEPARATOR}{nonce}{SEPARATOR}{ciphertext}",
            header = self.header(),
            salt = URL_SAFE_NO_PAD.encode(self.salt),
            nonce = URL_SAFE_NO_PAD.encode(self.nonce),
            ciphertext = URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }

    /// Parse the text form. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self, PayloadError> {
        let fields: Vec<&str> = text.trim().split(SEPARATOR).collect();
        if fields.len() != FIELD_COUNT {
            return Err(PayloadError::FieldCount(fields.len()));
        }
        if fields[0] != SCHEME {
            return Err(PayloadError::UnknownScheme);
        }

        let iterations = parse_iterations(fields[1])?;
        let salt = decode_fixed::<SALT_SIZE>("salt", fields[2])?;
        let nonce = decode_fixed::<NONCE_SIZE>("nonce", fields[3])?;
        let ciphertext = decode_field("ciphertext", fields[4])?;
        if ciphertext.len() < TAG_SIZE {
            return Err(PayloadError::Truncated);
        }

        Ok(Self {
            iterations,
            salt,
            nonce,
            ciphertext,
        })
    }
}

impl fmt::Display for EncryptedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for EncryptedPayload {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_iterations(field: &str) -> Result<u32, PayloadError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PayloadError::InvalidIterations);
    }
    let iterations: u32 = field.parse().map_err(|_| PayloadError::InvalidIterations)?;
    if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&iterations) {
        return Err(PayloadError::InvalidIterations);
    }
    Ok(iterations)
}

fn decode_field(field: &'static str, value: &str) -> Result<Vec<u8>, PayloadError> {
    URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|_| PayloadError::Encoding(field))
}

fn decode_fixed<const N: usize>(field: &'static str, value: &str) -> Result<[u8; N], PayloadError> {
    let bytes = decode_field(field, value)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| PayloadError::FieldLength {
        field,
        expected: N,
        actual: bytes.len(),
    })
}
