//! Heirloom CLI - two-key seed phrase escrow
//!
//! Usage:
//!   heirloom encrypt   - Encrypt a seed phrase under a benefactor and a beneficiary key
//!   heirloom decrypt   - Recover a seed phrase with both keys
//!   heirloom generate  - Generate a seed phrase from a wordlist
//!   heirloom validate  - Check a seed phrase against a wordlist
//!
//! Keys and the phrase to encrypt are always read from the terminal with
//! echo disabled, never from arguments. Results go to stdout, logs and
//! warnings to stderr.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use heirloom_core::{
    generate_from_source, validate_seed_phrase, EscrowConfig, EscrowService, SecretString, Validation, Wordlist,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(name = "heirloom")]
#[command(author = "HeyBattle1")]
#[command(version)]
#[command(about = "Two-key seed phrase escrow", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a seed phrase (the phrase is prompted, each key is entered twice)
    Encrypt {
        /// PBKDF2 iterations for this encryption
        #[arg(long)]
        iterations: Option<u32>,

        /// Warn about words missing from this wordlist before encrypting
        #[arg(long)]
        wordlist: Option<PathBuf>,
    },

    /// Decrypt a seed phrase (each key is entered once)
    Decrypt {
        /// Encrypted text produced by `heirloom encrypt`
        payload: String,

        /// Warn about recovered words missing from this wordlist
        #[arg(long)]
        wordlist: Option<PathBuf>,
    },

    /// Generate a random seed phrase
    Generate {
        /// Wordlist file, one word per line
        #[arg(long)]
        wordlist: Option<PathBuf>,

        /// Number of words
        #[arg(long, short = 'n')]
        words: Option<usize>,
    },

    /// Check every word of a seed phrase against a wordlist
    Validate {
        /// Seed phrase to check
        phrase: String,

        /// Wordlist file, one word per line
        #[arg(long)]
        wordlist: Option<PathBuf>,
    },
}

/// How a command ended, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    /// Validation found unknown words or a non-standard length
    Invalid,
    /// Validation had no wordlist to check against
    Skipped,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Invalid => ExitCode::FAILURE,
            Outcome::Skipped => ExitCode::from(2),
        }
    }
}

/// Where secrets typed by the user come from.
trait Prompt {
    fn secret(&mut self, prompt: &str) -> io::Result<String>;
}

/// Hidden input on the controlling terminal.
struct Terminal;

impl Prompt for Terminal {
    fn secret(&mut self, prompt: &str) -> io::Result<String> {
        rpassword::prompt_password(prompt)
    }
}

fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let outcome = run(cli, &mut Terminal, &mut io::stdout(), &mut io::stderr())?;
    Ok(outcome.into())
}

fn run(cli: Cli, prompt: &mut dyn Prompt, out: &mut dyn Write, err: &mut dyn Write) -> Result<Outcome> {
    let config = merge_flags(load_config(cli.config.as_deref())?, &cli.command);

    match cli.command {
        Commands::Encrypt { .. } => {
            let service = EscrowService::from_config(&config).context("Invalid configuration")?;

            let phrase = Zeroizing::new(prompt.secret("Seed phrase: ").context("Failed to read seed phrase")?);
            if let Some(path) = config.wordlist.as_deref() {
                report_findings(&phrase, path, err)?;
            }

            let benefactor = prompt_key(prompt, "Benefactor key: ")?;
            let benefactor_confirm = prompt_key(prompt, "Confirm benefactor key: ")?;
            let beneficiary = prompt_key(prompt, "Beneficiary key: ")?;
            let beneficiary_confirm = prompt_key(prompt, "Confirm beneficiary key: ")?;

            let encrypted = service
                .encrypt_seed_phrase(
                    &benefactor,
                    &benefactor_confirm,
                    &beneficiary,
                    &beneficiary_confirm,
                    &phrase,
                )
                .context("Encryption aborted")?;
            writeln!(out, "{encrypted}")?;
        }

        Commands::Decrypt { payload, .. } => {
            let service = EscrowService::from_config(&config).context("Invalid configuration")?;

            let benefactor = prompt_key(prompt, "Benefactor key: ")?;
            let beneficiary = prompt_key(prompt, "Beneficiary key: ")?;

            let phrase = service
                .decrypt_seed_phrase(&benefactor, &beneficiary, &payload)
                .context("Could not recover the seed phrase")?;
            if let Some(path) = config.wordlist.as_deref() {
                report_findings(&phrase, path, err)?;
            }
            writeln!(out, "{}", phrase.as_str())?;
        }

        Commands::Generate { .. } => {
            let Some(path) = config.wordlist else {
                bail!("No wordlist given; pass --wordlist or set \"wordlist\" in the config");
            };

            let phrase = generate_from_source(&path, config.word_count)
                .with_context(|| format!("Failed to generate a seed phrase from {}", path.display()))?;
            writeln!(out, "{phrase}")?;
        }

        Commands::Validate { phrase, .. } => {
            let wordlist = config.wordlist.as_deref().and_then(load_wordlist);
            return validate(&phrase, wordlist.as_ref(), out, err);
        }
    }

    Ok(Outcome::Success)
}

fn load_config(path: Option<&Path>) -> Result<EscrowConfig> {
    match path {
        Some(path) => EscrowConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EscrowConfig::default()),
    }
}

/// Command line flags take precedence over config file values.
fn merge_flags(mut config: EscrowConfig, command: &Commands) -> EscrowConfig {
    let (wordlist, iterations, words) = match command {
        Commands::Encrypt { iterations, wordlist } => (wordlist, *iterations, None),
        Commands::Decrypt { wordlist, .. } | Commands::Validate { wordlist, .. } => (wordlist, None, None),
        Commands::Generate { wordlist, words } => (wordlist, None, *words),
    };

    if let Some(wordlist) = wordlist {
        config.wordlist = Some(wordlist.clone());
    }
    if let Some(iterations) = iterations {
        config.kdf_iterations = iterations;
    }
    if let Some(words) = words {
        config.word_count = words;
    }
    config
}

fn prompt_key(prompt: &mut dyn Prompt, label: &str) -> Result<SecretString> {
    let key = prompt.secret(label).context("Failed to read key")?;
    Ok(SecretString::new(key))
}

/// A missing or unreadable wordlist is not fatal; callers fall back to
/// skipping validation.
fn load_wordlist(path: &Path) -> Option<Wordlist> {
    match Wordlist::load(path) {
        Ok(wordlist) => Some(wordlist),
        Err(e) => {
            tracing::warn!(error = %e, "Wordlist unavailable");
            None
        }
    }
}

fn validate(phrase: &str, wordlist: Option<&Wordlist>, out: &mut dyn Write, err: &mut dyn Write) -> Result<Outcome> {
    let validation = validate_seed_phrase(phrase, wordlist);
    if validation == Validation::Skipped {
        writeln!(err, "⚠️  No usable wordlist, validation skipped")?;
        return Ok(Outcome::Skipped);
    }
    if validation.is_valid() {
        writeln!(out, "✓ All words are in the wordlist")?;
        return Ok(Outcome::Success);
    }

    for finding in validation.invalid_words() {
        writeln!(out, "✗ word {}: {}", finding.position, finding.word)?;
    }
    if let Some(word_count) = validation.unexpected_length() {
        writeln!(out, "✗ {word_count} words, expected 12, 15, 18, 21 or 24")?;
    }
    Ok(Outcome::Invalid)
}

/// Warnings only; the phrase is still encrypted or printed.
fn report_findings(phrase: &str, path: &Path, err: &mut dyn Write) -> io::Result<()> {
    let wordlist = load_wordlist(path);
    let validation = validate_seed_phrase(phrase, wordlist.as_ref());
    for finding in validation.invalid_words() {
        writeln!(err, "⚠️  word {} is not in the wordlist: {}", finding.position, finding.word)?;
    }
    if let Some(word_count) = validation.unexpected_length() {
        writeln!(err, "⚠️  phrase has {word_count} words, standard phrases have 12, 15, 18, 21 or 24")?;
    }
    Ok(())
}
