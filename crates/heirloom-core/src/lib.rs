//! Heirloom Core - seed phrase escrow
//!
//! This crate contains the logic shared by every Heirloom frontend:
//! - `EscrowService`: the encrypt and decrypt operations
//! - `Wordlist`: the immutable word set, loaded once
//! - seed phrase generation and validation against a wordlist
//! - `EscrowConfig`: JSON configuration

pub mod config;
pub mod generator;
pub mod service;
pub mod validator;
pub mod wordlist;

pub use config::{ConfigError, EscrowConfig};
pub use generator::{
    entropy_bits, generate_from_source, generate_seed_phrase, generate_with_rng, GeneratorError, SeedPhrase,
    DEFAULT_WORD_COUNT,
};
pub use heirloom_crypto::{Party, SecretString};
pub use service::{EscrowError, EscrowService};
pub use validator::{is_standard_word_count, validate_seed_phrase, InvalidWord, Validation, STANDARD_WORD_COUNTS};
pub use wordlist::{Wordlist, WordlistError};
