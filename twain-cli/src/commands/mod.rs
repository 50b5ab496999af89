//! CLI command definitions and handlers.

mod derive;
mod session;

use clap::{Parser, Subcommand};
pub use derive::DeriveCommand;
pub use session::SessionCommand;
use twain::WordCount;
use twain_session::{IndexPolicy, SessionConfig};
use zeroize::Zeroizing;

/// Twain - a two-chain HD wallet in the terminal.
#[derive(Parser)]
#[command(name = "twain")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Number of mnemonic words for generated phrases (12 or 24).
    #[arg(short, long, global = true, default_value = "12")]
    pub words: usize,

    /// BIP39 passphrase (optional extra security).
    #[arg(short, long, global = true)]
    pub passphrase: Option<String>,

    /// How account indices are assigned after a wallet is deleted.
    #[arg(long, global = true, default_value = "monotonic")]
    pub index_policy: IndexPolicy,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Build the session settings from the global flags.
    pub fn session_config(&self) -> twain::Result<SessionConfig> {
        Ok(SessionConfig {
            word_count: WordCount::try_from(self.words)?,
            passphrase: Zeroizing::new(self.passphrase.clone().unwrap_or_default()),
            index_policy: self.index_policy,
        })
    }
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Interactive wallet session.
    #[command(name = "session", alias = "repl")]
    Session(SessionCommand),

    /// One-shot derivation of consecutive accounts.
    #[command(name = "derive")]
    Derive(DeriveCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_map_to_config() {
        let cli = Cli::try_parse_from([
            "twain",
            "session",
            "--words",
            "24",
            "--passphrase",
            "TREZOR",
            "--index-policy",
            "live-count",
        ])
        .unwrap();
        let config = cli.session_config().unwrap();
        assert_eq!(config.word_count, WordCount::TwentyFour);
        assert_eq!(config.passphrase.as_str(), "TREZOR");
        assert_eq!(config.index_policy, IndexPolicy::LiveCount);
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["twain", "derive", "--chain", "sol"]).unwrap();
        let config = cli.session_config().unwrap();
        assert_eq!(config.word_count, WordCount::Twelve);
        assert!(config.passphrase.is_empty());
        assert_eq!(config.index_policy, IndexPolicy::Monotonic);
        assert!(!cli.verbose);
    }

    #[test]
    fn rejects_unsupported_word_count() {
        let cli = Cli::try_parse_from(["twain", "session", "--words", "15"]).unwrap();
        assert!(matches!(cli.session_config(), Err(twain::Error::InvalidWordCount(15))));
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["twain", "session", "--index-policy", "random"]).is_err());
    }
}
