//! Property-based tests for seed phrase escrow
//!
//! 1. **Round-trip**: decrypt(k1, k2, encrypt(k1, k1, k2, k2, s)) == s
//! 2. **Key order**: the combined key depends on argument order
//! 3. **Wrong key**: any other benefactor key yields `DecryptionError`
//! 4. **Confirmation gate**: a mismatched confirmation never yields ciphertext

use heirloom_core::{EscrowError, EscrowService, Party, SecretString};
use heirloom_crypto::{derive_combined_key, SeedCipher, MIN_ITERATIONS};
use proptest::prelude::*;

fn secret(s: &str) -> SecretString {
    SecretString::new(s.to_string())
}

fn service() -> EscrowService {
    EscrowService::new(SeedCipher::new(MIN_ITERATIONS).unwrap())
}

fn encrypt(service: &EscrowService, k1: &str, k2: &str, phrase: &str) -> Result<String, EscrowError> {
    service.encrypt_seed_phrase(&secret(k1), &secret(k1), &secret(k2), &secret(k2), phrase)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_roundtrip(
        k1 in "\\PC{1,40}",
        k2 in "\\PC{1,40}",
        phrase in "\\PC{0,300}",
    ) {
        let service = service();
        let encrypted = encrypt(&service, &k1, &k2, &phrase).unwrap();
        let decrypted = service
            .decrypt_seed_phrase(&secret(&k1), &secret(&k2), &encrypted)
            .unwrap();
        prop_assert_eq!(decrypted.as_str(), phrase.as_str());
    }

    #[test]
    fn prop_key_order_sensitive(k1 in "\\PC{1,40}", k2 in "\\PC{1,40}") {
        prop_assume!(k1 != k2);
        let forward = derive_combined_key(&secret(&k1), &secret(&k2)).unwrap();
        let swapped = derive_combined_key(&secret(&k2), &secret(&k1)).unwrap();
        prop_assert_ne!(forward.as_bytes(), swapped.as_bytes());
    }

    #[test]
    fn prop_wrong_benefactor_rejected(
        k1 in "[A-Za-z0-9!@#$%^&*()]{5,30}",
        wrong in "[A-Za-z0-9!@#$%^&*()]{5,30}",
        k2 in "[A-Za-z0-9!@#$%^&*()]{5,30}",
        phrase in "[a-z]{3,8}( [a-z]{3,8}){11}",
    ) {
        prop_assume!(k1 != wrong);
        let service = service();
        let encrypted = encrypt(&service, &k1, &k2, &phrase).unwrap();
        let result = service.decrypt_seed_phrase(&secret(&wrong), &secret(&k2), &encrypted);
        prop_assert_eq!(result.unwrap_err(), EscrowError::DecryptionError);
    }

    #[test]
    fn prop_confirmation_gate(
        k1 in "\\PC{1,20}",
        confirm in "\\PC{1,20}",
        k2 in "\\PC{1,20}",
    ) {
        prop_assume!(k1 != confirm);
        let result = service().encrypt_seed_phrase(
            &secret(&k1),
            &secret(&confirm),
            &secret(&k2),
            &secret(&k2),
            "abandon ability able",
        );
        prop_assert_eq!(result.unwrap_err(), EscrowError::KeyConfirmationMismatch(Party::Benefactor));
    }
}
