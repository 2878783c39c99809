//! Mnemonic wordlist
//!
//! Loaded once at startup from a word-per-line text file and then shared
//! read-only (wrap it in an `Arc` to hand it to several threads).

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordlistError {
    #[error("Wordlist not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Wordlist is empty")]
    Empty,

    #[error("IO error reading wordlist: {0}")]
    Io(#[from] io::Error),
}

/// Immutable list of valid words, in file order, with O(1) membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wordlist {
    words: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Wordlist {
    /// Build from one-word-per-line text.
    ///
    /// Trailing whitespace (including `\r`) is stripped from every line and
    /// lines left empty are skipped. A repeated word keeps its first position.
    pub fn parse(text: &str) -> Result<Self, WordlistError> {
        Self::from_words(text.lines().map(str::trim_end))
    }

    pub fn from_words<I, S>(words: I) -> Result<Self, WordlistError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Vec::new();
        let mut positions = HashMap::new();
        for word in words {
            let word = word.into();
            if word.is_empty() {
                continue;
            }
            positions.entry(word.clone()).or_insert(list.len());
            list.push(word);
        }

        if list.is_empty() {
            return Err(WordlistError::Empty);
        }
        Ok(Self {
            words: list,
            positions,
        })
    }

    /// Load a wordlist file.
    pub fn load(path: &Path) -> Result<Self, WordlistError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => WordlistError::NotFound(path.to_path_buf()),
            _ => WordlistError::Io(e),
        })?;
        let wordlist = Self::parse(&text)?;
        tracing::info!(path = %path.display(), words = wordlist.len(), "Loaded wordlist");
        Ok(wordlist)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Never true for a constructed wordlist.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.positions.contains_key(word)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Index of the first occurrence of `word`.
    pub fn position(&self, word: &str) -> Option<usize> {
        self.positions.get(word).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub(crate) fn as_slice(&self) -> &[String] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_strips_trailing_whitespace() {
        let list = Wordlist::parse("abandon\r\nability  \nable\t\n").unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.contains("abandon"));
        assert!(list.contains("ability"));
        assert!(list.contains("able"));
        assert!(!list.contains("ability  "));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let list = Wordlist::parse("\nabandon\n\n   \nability\n").unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["abandon", "ability"]);
    }

    #[test]
    fn test_order_preserved_for_lookup() {
        let list = Wordlist::parse("zoo\nabandon\nmiddle").unwrap();
        assert_eq!(list.get(0), Some("zoo"));
        assert_eq!(list.get(2), Some("middle"));
        assert_eq!(list.get(3), None);
        assert_eq!(list.position("abandon"), Some(1));
        assert_eq!(list.position("missing"), None);
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let list = Wordlist::parse("a\nb\na").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.position("a"), Some(0));
    }

    #[test]
    fn test_case_sensitive() {
        let list = Wordlist::parse("abandon").unwrap();
        assert!(!list.contains("Abandon"));
        assert!(!list.contains("ABANDON"));
    }

    #[test]
    fn test_empty_wordlist_rejected() {
        assert!(matches!(Wordlist::parse(""), Err(WordlistError::Empty)));
        assert!(matches!(Wordlist::parse("\n \n\t\n"), Err(WordlistError::Empty)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "abandon\nability\nable").unwrap();

        let list = Wordlist::load(file.path()).unwrap();
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("english.txt");
        match Wordlist::load(&path) {
            Err(WordlistError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
