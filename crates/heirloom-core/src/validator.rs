//! Seed phrase validation against a wordlist
//!
//! Unknown words and an unusual word count are findings, not errors: a
//! phrase from a non-English list is still a legitimate thing to encrypt
//! or recover. When no wordlist is available the check is skipped with a
//! warning instead of blocking the caller.

use crate::wordlist::Wordlist;

/// A word that is not in the wordlist, with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidWord {
    pub word: String,
    pub position: usize,
}

/// Phrase lengths defined by BIP39
pub const STANDARD_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

pub fn is_standard_word_count(word_count: usize) -> bool {
    STANDARD_WORD_COUNTS.contains(&word_count)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// No wordlist was available
    Skipped,
    /// Every word was checked
    Checked {
        invalid: Vec<InvalidWord>,
        word_count: usize,
    },
}

impl Validation {
    /// True only when the phrase was checked, every word is known and the
    /// phrase has a standard length.
    pub fn is_valid(&self) -> bool {
        match self {
            Validation::Checked { invalid, word_count } => invalid.is_empty() && is_standard_word_count(*word_count),
            Validation::Skipped => false,
        }
    }

    pub fn invalid_words(&self) -> &[InvalidWord] {
        match self {
            Validation::Checked { invalid, .. } => invalid,
            Validation::Skipped => &[],
        }
    }

    /// The word count, if the phrase was checked and it is not one of
    /// [`STANDARD_WORD_COUNTS`].
    pub fn unexpected_length(&self) -> Option<usize> {
        match self {
            Validation::Checked { word_count, .. } if !is_standard_word_count(*word_count) => Some(*word_count),
            _ => None,
        }
    }
}

/// Check every word of `phrase` against `wordlist`.
///
/// Words are split on whitespace and compared exactly (case-sensitive).
pub fn validate_seed_phrase(phrase: &str, wordlist: Option<&Wordlist>) -> Validation {
    let Some(wordlist) = wordlist else {
        tracing::warn!("No wordlist available, seed phrase validation skipped");
        return Validation::Skipped;
    };

    let words: Vec<&str> = phrase.split_whitespace().collect();
    let invalid: Vec<InvalidWord> = words
        .iter()
        .enumerate()
        .filter(|(_, word)| !wordlist.contains(word))
        .map(|(i, word)| InvalidWord {
            word: word.to_string(),
            position: i + 1,
        })
        .collect();

    if !invalid.is_empty() {
        tracing::debug!(count = invalid.len(), "Seed phrase contains unknown words");
    }
    if !is_standard_word_count(words.len()) {
        tracing::debug!(word_count = words.len(), "Seed phrase has a non-standard length");
    }
    Validation::Checked {
        invalid,
        word_count: words.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wordlist() -> Wordlist {
        Wordlist::from_words(["abandon", "ability", "able", "about"]).unwrap()
    }

    fn repeat(words: &str, times: usize) -> String {
        vec![words; times].join(" ")
    }

    #[test]
    fn test_valid_phrase() {
        let result = validate_seed_phrase(&repeat("abandon ability able about", 3), Some(&wordlist()));
        assert!(result.is_valid());
        assert!(result.invalid_words().is_empty());
        assert_eq!(result.unexpected_length(), None);
    }

    #[test]
    fn test_every_standard_length_accepted() {
        for word_count in STANDARD_WORD_COUNTS {
            let result = validate_seed_phrase(&repeat("able", word_count), Some(&wordlist()));
            assert!(result.is_valid(), "{word_count} words");
        }
    }

    #[test]
    fn test_short_phrase_of_known_words_is_not_valid() {
        let wordlist = Wordlist::from_words(["abandon", "ability", "able"]).unwrap();
        let result = validate_seed_phrase("abandon ability able", Some(&wordlist));
        assert!(!result.is_valid());
        assert!(result.invalid_words().is_empty());
        assert_eq!(result.unexpected_length(), Some(3));
    }

    #[test]
    fn test_non_standard_lengths_flagged() {
        for word_count in [1, 11, 13, 23, 25] {
            let result = validate_seed_phrase(&repeat("able", word_count), Some(&wordlist()));
            assert_eq!(result.unexpected_length(), Some(word_count));
        }
    }

    #[test]
    fn test_invalid_words_reported_with_positions() {
        let result = validate_seed_phrase("abandon wrong able phrase", Some(&wordlist()));
        assert!(!result.is_valid());
        assert_eq!(
            result.invalid_words(),
            &[
                InvalidWord {
                    word: "wrong".to_string(),
                    position: 2
                },
                InvalidWord {
                    word: "phrase".to_string(),
                    position: 4
                },
            ]
        );
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let result = validate_seed_phrase("Abandon", Some(&wordlist()));
        assert_eq!(result.invalid_words().len(), 1);
    }

    #[test]
    fn test_missing_wordlist_skips() {
        let result = validate_seed_phrase("anything at all", None);
        assert_eq!(result, Validation::Skipped);
        assert!(!result.is_valid());
        assert!(result.invalid_words().is_empty());
        assert_eq!(result.unexpected_length(), None);
    }

    #[test]
    fn test_empty_phrase_has_no_unknown_words() {
        let result = validate_seed_phrase("", Some(&wordlist()));
        assert!(result.invalid_words().is_empty());
        assert_eq!(result.unexpected_length(), Some(0));
        assert!(!result.is_valid());
    }
}
