//! Heirloom Crypto - dual-key seed phrase encryption
//!
//! This crate provides:
//! - Combined key derivation from a benefactor key and a beneficiary key
//! - PBKDF2-HMAC-SHA256 key stretching with a fresh salt per encryption
//! - ChaCha20-Poly1305 authenticated encryption
//! - A self-contained, escape-free text payload format
//!
//! ```text
//! benefactor key ─┐
//!                 ├─ SHA-256 (length-prefixed, ordered) → CombinedKey
//! beneficiary key ┘                                          │
//!                                 random salt → PBKDF2 ──────┘
//!                                                  │
//!                       random nonce → ChaCha20-Poly1305 → hl1 payload
//! ```
//!
//! No I/O happens here. All secret buffers are zeroized on drop.

pub mod cipher;
pub mod keys;
pub mod payload;

pub use cipher::{CipherError, SeedCipher, DEFAULT_ITERATIONS};
pub use keys::{derive_combined_key, CombinedKey, KeyError, Party};
pub use payload::{EncryptedPayload, PayloadError, MAX_ITERATIONS, MIN_ITERATIONS};
pub use secrecy::{ExposeSecret, SecretString};
