//! Seed phrase generation
//!
//! Every position is an independent, uniform draw from the wordlist, so
//! words may repeat. A phrase carries `word_count * log2(wordlist.len())`
//! bits of entropy: 264 bits for 24 words over the 2048-word BIP39 list.
//! Because draws are with replacement, the wordlist may be shorter than
//! the phrase.

use std::fmt;
use std::path::Path;

use rand::{rngs::OsRng, seq::SliceRandom, CryptoRng, RngCore};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::wordlist::{Wordlist, WordlistError};

/// Words in a generated phrase when the caller does not say otherwise
pub const DEFAULT_WORD_COUNT: usize = 24;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Word count must be at least 1")]
    ZeroWordCount,

    #[error(transparent)]
    Wordlist(#[from] WordlistError),
}

/// An ordered, space-separated sequence of words. Scrubbed on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SeedPhrase {
    words: Vec<String>,
}

impl SeedPhrase {
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

impl fmt::Display for SeedPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(word)?;
        }
        Ok(())
    }
}

impl fmt::Debug for SeedPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeedPhrase({} words, [REDACTED])", self.words.len())
    }
}

/// Upper bound on the entropy of a generated phrase, in bits.
pub fn entropy_bits(wordlist_len: usize, word_count: usize) -> f64 {
    if wordlist_len == 0 {
        return 0.0;
    }
    word_count as f64 * (wordlist_len as f64).log2()
}

/// Generate a phrase of `word_count` words using the OS CSPRNG.
pub fn generate_seed_phrase(wordlist: &Wordlist, word_count: usize) -> Result<SeedPhrase, GeneratorError> {
    generate_with_rng(wordlist, word_count, &mut OsRng)
}

/// Generate a phrase with a caller-supplied cryptographic RNG.
///
/// The `CryptoRng` bound keeps general-purpose generators out.
pub fn generate_with_rng<R>(
    wordlist: &Wordlist,
    word_count: usize,
    rng: &mut R,
) -> Result<SeedPhrase, GeneratorError>
where
    R: RngCore + CryptoRng,
{
    if word_count == 0 {
        return Err(GeneratorError::ZeroWordCount);
    }

    let mut words = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        let word = wordlist
            .as_slice()
            .choose(&mut *rng)
            .ok_or(WordlistError::Empty)?;
        words.push(word.clone());
    }

    tracing::debug!(
        word_count,
        wordlist_len = wordlist.len(),
        entropy_bits = entropy_bits(wordlist.len(), word_count),
        "Generated seed phrase"
    );
    Ok(SeedPhrase { words })
}

/// Load a wordlist file and generate a phrase from it.
///
/// # Errors
///
/// - `Wordlist(NotFound)`: the file does not exist
/// - `Wordlist(Empty)`: the file has no words
/// - `ZeroWordCount`: `word_count` is 0
pub fn generate_from_source(source: &Path, word_count: usize) -> Result<SeedPhrase, GeneratorError> {
    let wordlist = Wordlist::load(source)?;
    generate_seed_phrase(&wordlist, word_count)
}
