//! Concurrent encrypt, decrypt and generate calls sharing one wordlist

use std::io::Write;
use std::sync::Arc;
use std::thread;

use heirloom_core::{
    generate_seed_phrase, validate_seed_phrase, EscrowService, SecretString, Wordlist,
};
use heirloom_crypto::{SeedCipher, MIN_ITERATIONS};

const WORDS: &str = "abandon\nability\nable\nabout\nabove\nabsent\nabsorb\nabstract\n\
absurd\nabuse\naccess\naccident\naccount\naccuse\nachieve\nacid\n";

fn secret(s: &str) -> SecretString {
    SecretString::new(s.to_string())
}

#[test]
fn test_parallel_roundtrips_share_wordlist() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(WORDS.as_bytes()).unwrap();
    let wordlist = Arc::new(Wordlist::load(file.path()).unwrap());
    let service = EscrowService::new(SeedCipher::new(MIN_ITERATIONS).unwrap());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let wordlist = Arc::clone(&wordlist);
            thread::spawn(move || {
                let phrase = generate_seed_phrase(&wordlist, 12).unwrap().to_string();
                let benefactor = format!("benefactor-{i}");
                let beneficiary = format!("beneficiary-{i}");

                let encrypted = service
                    .encrypt_seed_phrase(
                        &secret(&benefactor),
                        &secret(&benefactor),
                        &secret(&beneficiary),
                        &secret(&beneficiary),
                        &phrase,
                    )
                    .unwrap();
                let decrypted = service
                    .decrypt_seed_phrase(&secret(&benefactor), &secret(&beneficiary), &encrypted)
                    .unwrap();

                assert_eq!(decrypted.as_str(), phrase);
                assert!(validate_seed_phrase(&decrypted, Some(&wordlist)).is_valid());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_failed_call_does_not_affect_next() {
    let service = EscrowService::new(SeedCipher::new(MIN_ITERATIONS).unwrap());
    let phrase = "abandon ability able about";

    assert!(service
        .decrypt_seed_phrase(&secret("a"), &secret("b"), "garbage")
        .is_err());

    let encrypted = service
        .encrypt_seed_phrase(&secret("a"), &secret("a"), &secret("b"), &secret("b"), phrase)
        .unwrap();
    let decrypted = service
        .decrypt_seed_phrase(&secret("a"), &secret("b"), &encrypted)
        .unwrap();
    assert_eq!(decrypted.as_str(), phrase);
}
