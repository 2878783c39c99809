//! Escrow configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.
//!
//! ```json
//! {
//!   "kdf_iterations": 600000,
//!   "word_count": 24,
//!   "wordlist": "/usr/share/heirloom/english.txt"
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use heirloom_crypto::{DEFAULT_ITERATIONS, MAX_ITERATIONS, MIN_ITERATIONS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generator::DEFAULT_WORD_COUNT;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("kdf_iterations must be in 1000..=10000000, got {0}")]
    InvalidIterations(u32),

    #[error("word_count must be at least 1")]
    ZeroWordCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EscrowConfig {
    /// PBKDF2 iterations used for new encryptions
    pub kdf_iterations: u32,
    /// Words per generated phrase
    pub word_count: usize,
    /// Wordlist used for generation and validation
    pub wordlist: Option<PathBuf>,
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self {
            kdf_iterations: DEFAULT_ITERATIONS,
            word_count: DEFAULT_WORD_COUNT,
            wordlist: None,
        }
    }
}

impl EscrowConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&self.kdf_iterations) {
            return Err(ConfigError::InvalidIterations(self.kdf_iterations));
        }
        if self.word_count == 0 {
            return Err(ConfigError::ZeroWordCount);
        }
        Ok(())
    }
}
