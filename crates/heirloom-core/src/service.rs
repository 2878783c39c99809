//! Seed phrase escrow - the two public operations
//!
//! Encrypt: confirm keys → derive combined key → seal → payload text
//! Decrypt: derive combined key → open → seed phrase
//!
//! Encryption takes every key twice and refuses to run unless each key
//! matches its confirmation. Decryption takes each key once.
//!
//! The combined key and the stretched AEAD key are scoped to one call and
//! zeroized when it returns, on success and on every error path.

use heirloom_crypto::{
    derive_combined_key, ExposeSecret, KeyError, Party, SecretString, SeedCipher,
};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::{ConfigError, EscrowConfig};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscrowError {
    #[error("The {0} key is empty")]
    EmptyKey(Party),

    #[error("The {0} key and its confirmation do not match")]
    KeyConfirmationMismatch(Party),

    #[error("Decryption failed - check both keys and the encrypted text")]
    DecryptionError,

    #[error("Encryption failed")]
    EncryptionFailed,
}

impl From<KeyError> for EscrowError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::EmptyKey(party) => EscrowError::EmptyKey(party),
        }
    }
}

/// Stateless escrow service. Cheap to copy and safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscrowService {
    cipher: SeedCipher,
}

impl EscrowService {
    pub fn new(cipher: SeedCipher) -> Self {
        Self { cipher }
    }

    pub fn from_config(config: &EscrowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let cipher = SeedCipher::new(config.kdf_iterations)
            .map_err(|_| ConfigError::InvalidIterations(config.kdf_iterations))?;
        Ok(Self::new(cipher))
    }

    pub fn iterations(&self) -> u32 {
        self.cipher.iterations()
    }

    /// Encrypt a seed phrase so that only both keys together recover it.
    ///
    /// # Errors
    ///
    /// - `KeyConfirmationMismatch`: a key differs from its confirmation
    ///   (benefactor checked first); nothing is derived or encrypted
    /// - `EmptyKey`: a key is empty
    pub fn encrypt_seed_phrase(
        &self,
        benefactor_key: &SecretString,
        benefactor_key_confirm: &SecretString,
        beneficiary_key: &SecretString,
        beneficiary_key_confirm: &SecretString,
        seed_phrase: &str,
    ) -> Result<String, EscrowError> {
        let _span = tracing::debug_span!("encrypt_seed_phrase").entered();

        confirm(Party::Benefactor, benefactor_key, benefactor_key_confirm)?;
        confirm(Party::Beneficiary, beneficiary_key, beneficiary_key_confirm)?;
        tracing::debug!("Keys confirmed");

        let key = derive_combined_key(benefactor_key, beneficiary_key)?;
        let payload = self
            .cipher
            .encrypt(&key, seed_phrase.as_bytes())
            .map_err(|_| EscrowError::EncryptionFailed)?;

        tracing::info!(iterations = payload.iterations, "Seed phrase encrypted");
        Ok(payload.to_text())
    }

    /// Recover a seed phrase from its encrypted text.
    ///
    /// # Errors
    ///
    /// - `EmptyKey`: a key is empty
    /// - `DecryptionError`: wrong keys, swapped keys, corrupted or malformed
    ///   text, all reported as the same error
    pub fn decrypt_seed_phrase(
        &self,
        benefactor_key: &SecretString,
        beneficiary_key: &SecretString,
        ciphertext: &str,
    ) -> Result<Zeroizing<String>, EscrowError> {
        let _span = tracing::debug_span!("decrypt_seed_phrase").entered();

        let key = derive_combined_key(benefactor_key, beneficiary_key)?;
        let plaintext = self.cipher.decrypt_text(&key, ciphertext).map_err(|_| {
            tracing::warn!("Seed phrase decryption failed");
            EscrowError::DecryptionError
        })?;

        let phrase = std::str::from_utf8(&plaintext).map_err(|_| EscrowError::DecryptionError)?;

        tracing::info!("Seed phrase decrypted");
        Ok(Zeroizing::new(phrase.to_owned()))
    }
}

fn confirm(party: Party, key: &SecretString, confirmation: &SecretString) -> Result<(), EscrowError> {
    if key.expose_secret() != confirmation.expose_secret() {
        tracing::warn!(%party, "Key confirmation mismatch");
        return Err(EscrowError::KeyConfirmationMismatch(party));
    }
    Ok(())
}
